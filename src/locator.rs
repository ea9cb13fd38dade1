//! Element locators.
//!
//! A [`Locator`] is an immutable `(strategy, selector)` pair. Page objects
//! declare theirs as `const` items; locators that depend on runtime text are
//! built by pure constructors that quote the text instead of splicing it
//! into the query.

use std::borrow::Cow;
use std::fmt;

use thirtyfour::By;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Id,
    Name,
    Css,
    XPath,
    LinkText,
}

impl Strategy {
    fn label(self) -> &'static str {
        match self {
            Strategy::Id => "id",
            Strategy::Name => "name",
            Strategy::Css => "css selector",
            Strategy::XPath => "xpath",
            Strategy::LinkText => "link text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    strategy: Strategy,
    selector: Cow<'static, str>,
}

impl Locator {
    pub fn new<S>(strategy: Strategy, selector: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Locator {
            strategy,
            selector: selector.into(),
        }
    }

    pub const fn id(selector: &'static str) -> Self {
        Locator {
            strategy: Strategy::Id,
            selector: Cow::Borrowed(selector),
        }
    }

    pub const fn name(selector: &'static str) -> Self {
        Locator {
            strategy: Strategy::Name,
            selector: Cow::Borrowed(selector),
        }
    }

    pub const fn css(selector: &'static str) -> Self {
        Locator {
            strategy: Strategy::Css,
            selector: Cow::Borrowed(selector),
        }
    }

    pub const fn xpath(selector: &'static str) -> Self {
        Locator {
            strategy: Strategy::XPath,
            selector: Cow::Borrowed(selector),
        }
    }

    pub const fn link_text(selector: &'static str) -> Self {
        Locator {
            strategy: Strategy::LinkText,
            selector: Cow::Borrowed(selector),
        }
    }

    /// Any element whose own text contains `fragment`.
    ///
    /// The fragment is emitted as an XPath string literal, so quotes in it
    /// cannot change the shape of the query.
    pub fn containing_text(fragment: &str) -> Self {
        Locator::new(
            Strategy::XPath,
            format!("//*[contains(text(), {})]", escape_string(fragment)),
        )
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The thirtyfour query for this locator, borrowing its selector.
    pub fn by(&self) -> By<'_> {
        let selector: &str = &self.selector;
        match self.strategy {
            Strategy::Id => By::Id(selector),
            Strategy::Name => By::Name(selector),
            Strategy::Css => By::Css(selector),
            Strategy::XPath => By::XPath(selector),
            Strategy::LinkText => By::LinkText(selector),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {:?})", self.strategy.label(), self.selector)
    }
}

/// Quote `value` as an XPath string literal.
pub fn escape_string(value: &str) -> String {
    let contains_single = value.contains('\'');
    let contains_double = value.contains('"');
    if contains_single && contains_double {
        let parts: Vec<String> = value.split('"').map(|s| format!("\"{}\"", s)).collect();
        return format!("concat({})", parts.join(", '\"', "));
    }

    if contains_double {
        format!("'{}'", value)
    } else {
        format!("\"{}\"", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: Locator = Locator::name("email");

    #[test]
    fn maps_onto_thirtyfour_queries() {
        assert!(matches!(Locator::id("clientes").by(), By::Id("clientes")));
        assert!(matches!(EMAIL.by(), By::Name("email")));
        assert!(matches!(Locator::link_text("Registrate").by(), By::LinkText("Registrate")));
        assert!(matches!(
            Locator::containing_text("Ross").by(),
            By::XPath("//*[contains(text(), \"Ross\")]")
        ));
    }

    #[test]
    fn containing_text_quotes_fragment() {
        assert_eq!(
            Locator::containing_text("Ross").selector(),
            "//*[contains(text(), \"Ross\")]"
        );
        assert_eq!(
            Locator::containing_text("say \"hi\"").selector(),
            "//*[contains(text(), 'say \"hi\"')]"
        );
        assert_eq!(
            Locator::containing_text("it's \"x\"").selector(),
            "//*[contains(text(), concat(\"it's \", '\"', \"x\", '\"', \"\"))]"
        );
    }

    #[test]
    fn display_names_strategy() {
        assert_eq!(EMAIL.to_string(), "(name, \"email\")");
        assert_eq!(Locator::css(".card").to_string(), "(css selector, \".card\")");
    }
}
