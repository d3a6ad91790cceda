/// Mobile navigation toggle

/// Viewports at or below this width close the nav after a link is chosen
pub const NARROW_NAV_MAX_WIDTH: f64 = 780.0;

/// Attribute values mirroring the nav state onto the DOM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavAttributes {
    /// `data-visible` on the nav list
    pub data_visible: &'static str,
    /// `aria-expanded` on the toggle button
    pub aria_expanded: &'static str,
    /// Whether the toggle carries the `is-open` class
    pub is_open_class: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavToggle {
    open: bool,
}

impl NavToggle {
    /// Start from the markup's current `data-visible` value
    pub fn from_attribute(data_visible: Option<&str>) -> Self {
        Self {
            open: data_visible == Some("true"),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn attributes(&self) -> NavAttributes {
        let flag = if self.open { "true" } else { "false" };
        NavAttributes {
            data_visible: flag,
            aria_expanded: flag,
            is_open_class: self.open,
        }
    }

    pub fn toggle(&mut self) -> NavAttributes {
        self.open = !self.open;
        self.attributes()
    }

    /// A nav link was clicked; on narrow viewports the nav closes.
    /// Returns the attributes to apply, if anything changes.
    pub fn link_selected(&mut self, viewport_width: f64) -> Option<NavAttributes> {
        if viewport_width > NARROW_NAV_MAX_WIDTH {
            return None;
        }
        self.open = false;
        Some(self.attributes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_restores_attributes() {
        for initial in [None, Some("false"), Some("true")] {
            let mut nav = NavToggle::from_attribute(initial);
            let original = nav.attributes();
            let flipped = nav.toggle();
            assert_ne!(flipped, original);
            assert_eq!(nav.toggle(), original);
        }
    }

    #[test]
    fn open_sets_all_three_flags() {
        let mut nav = NavToggle::default();
        let attrs = nav.toggle();
        assert_eq!(attrs.data_visible, "true");
        assert_eq!(attrs.aria_expanded, "true");
        assert!(attrs.is_open_class);
    }

    #[test]
    fn link_closes_only_on_narrow_viewports() {
        let mut nav = NavToggle::from_attribute(Some("true"));
        assert_eq!(nav.link_selected(1024.0), None);
        assert!(nav.is_open());

        let attrs = nav.link_selected(780.0).unwrap();
        assert!(!nav.is_open());
        assert_eq!(attrs.data_visible, "false");
        assert!(!attrs.is_open_class);
    }
}
