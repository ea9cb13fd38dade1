//! Ready-made wait conditions.
//!
//! Each condition queries the session once per call and returns `Some` when
//! satisfied. Lookups that find nothing surface as `NoSuchElement`, which the
//! waiter treats as "not yet".

use stringmatch::{Needle, StringMatch};

use crate::error::WebDriverResult;
use crate::locator::Locator;
use crate::webdrivercommands::WebDriverCommands;
use crate::{WebDriverSession, WebElement};

/// The first element matching `locator`, once it is displayed.
pub fn visibility_of<'a>(
    locator: &Locator,
) -> impl Fn(&'a WebDriverSession) -> WebDriverResult<Option<WebElement<'a>>> {
    let locator = locator.clone();
    move |session| {
        let elem = session.find_element(&locator)?;
        if elem.is_displayed()? {
            Ok(Some(elem))
        } else {
            Ok(None)
        }
    }
}

/// The first element matching `locator`, once it is in the DOM.
pub fn presence_of<'a>(
    locator: &Locator,
) -> impl Fn(&'a WebDriverSession) -> WebDriverResult<Option<WebElement<'a>>> {
    let locator = locator.clone();
    move |session| session.find_element(&locator).map(Some)
}

/// The current URL, once it matches `needle`.
pub fn url_matches<'a, N>(needle: N) -> impl Fn(&'a WebDriverSession) -> WebDriverResult<Option<String>>
where
    N: Needle,
{
    move |session| {
        let url = session.current_url()?;
        if needle.is_match(&url) {
            Ok(Some(url))
        } else {
            Ok(None)
        }
    }
}

/// The current URL, once it contains `text`.
pub fn url_contains<'a>(text: &str) -> impl Fn(&'a WebDriverSession) -> WebDriverResult<Option<String>> {
    url_matches(StringMatch::new(text).partial())
}
