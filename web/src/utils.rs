use memgrid_core::Variant;

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Navigation parameters passed in the query string.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct QueryParams {
    pub game: Option<String>,
    pub mainpage_url: Option<String>,
}

impl QueryParams {
    pub(crate) fn from_location() -> Self {
        let search = gloo::utils::window()
            .location()
            .search()
            .unwrap_or_default();
        Self::from_search(&search)
    }

    /// Parses a `?key=value&...` string, percent-decoding values.
    pub(crate) fn from_search(search: &str) -> Self {
        match web_sys::UrlSearchParams::new_with_str(search) {
            Ok(params) => Self {
                game: params.get("game"),
                mainpage_url: params.get("mainpage_url"),
            }
            .normalized(),
            Err(err) => {
                log::error!("failed to parse query {:?}: {:?}", search, err);
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> Self {
        self.game = self.game.filter(|game| !game.is_empty());
        self.mainpage_url = self.mainpage_url.filter(|url| !url.is_empty());
        self
    }

    pub(crate) fn variant(&self) -> Option<Variant> {
        let game = self.game.as_deref()?;
        match game.parse() {
            Ok(variant) => Some(variant),
            Err(err) => {
                log::warn!("{}, showing launcher instead", err);
                None
            }
        }
    }
}

/// Where the launcher sends the player; `encoded_return` must already be URI-component encoded.
pub(crate) fn game_href(variant: Variant, encoded_return: &str) -> String {
    format!("?game={}&mainpage_url={}", variant.id(), encoded_return)
}

/// Full URL of the current page without query or hash, suitable for the "return" button.
pub(crate) fn launcher_url() -> String {
    let location = gloo::utils::window().location();
    let origin = location.origin().unwrap_or_default();
    let path = location.pathname().unwrap_or_default();
    format!("{origin}{path}")
}

pub(crate) fn navigate_to(url: &str) {
    if let Err(err) = gloo::utils::window().location().set_href(url) {
        log::error!("failed to navigate to {}: {:?}", url, err);
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn parses_launcher_link() {
        let href = game_href(
            Variant::SequenceSprint,
            &String::from(js_sys::encode_uri_component("http://host/games/?x=1")),
        );
        let query = QueryParams::from_search(&href);

        assert_eq!(query.variant(), Some(Variant::SequenceSprint));
        assert_eq!(query.mainpage_url.as_deref(), Some("http://host/games/?x=1"));
    }

    #[wasm_bindgen_test]
    fn blank_values_are_dropped() {
        let query = QueryParams::from_search("?game=&mainpage_url=");

        assert_eq!(query, QueryParams::default());
    }
}
