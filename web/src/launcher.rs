use memgrid_core::Variant;
use yew::prelude::*;

use crate::utils::*;

/// Which catalog entry the launcher is showing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Carousel {
    games: &'static [Variant],
    current: usize,
}

impl Carousel {
    pub(crate) fn new(games: &'static [Variant]) -> Self {
        assert!(!games.is_empty(), "launcher needs at least one game");
        Self { games, current: 0 }
    }

    pub(crate) fn selected(self) -> Variant {
        self.games[self.current]
    }

    pub(crate) fn next(self) -> Self {
        Self {
            current: (self.current + 1) % self.games.len(),
            ..self
        }
    }

    pub(crate) fn prev(self) -> Self {
        Self {
            current: (self.current + self.games.len() - 1) % self.games.len(),
            ..self
        }
    }
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(&Variant::ALL)
    }
}

#[function_component]
pub(crate) fn LauncherView() -> Html {
    let carousel = use_state(Carousel::default);
    let selected = carousel.selected();

    let on_prev = {
        let carousel = carousel.clone();
        Callback::from(move |_: MouseEvent| carousel.set(carousel.prev()))
    };
    let on_next = {
        let carousel = carousel.clone();
        Callback::from(move |_: MouseEvent| carousel.set(carousel.next()))
    };
    let on_start = Callback::from(move |_: MouseEvent| {
        log::info!("Starting {}...", selected.display_name());
        let encoded: String = js_sys::encode_uri_component(&launcher_url()).into();
        navigate_to(&game_href(selected, &encoded));
    });

    html! {
        <div class="launcher">
            <div class="display">
                <div class="game-icon">{selected.icon()}</div>
                <div class="game-name">{selected.display_name()}</div>
            </div>
            <nav>
                <button class="prev" onclick={on_prev}>{"◀"}</button>
                <button class="start" onclick={on_start}>{"Start Game"}</button>
                <button class="next" onclick={on_next}>{"▶"}</button>
            </nav>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_and_prev_wrap_around() {
        let carousel = Carousel::default();
        let last = Variant::ALL[Variant::ALL.len() - 1];

        assert_eq!(carousel.selected(), Variant::ALL[0]);
        assert_eq!(carousel.prev().selected(), last);
        assert_eq!(carousel.prev().next(), carousel);

        let mut walked = carousel;
        for _ in 0..Variant::ALL.len() {
            walked = walked.next();
        }
        assert_eq!(walked, carousel);
    }

    #[test]
    fn single_game_carousel_stays_put() {
        static ONLY: [Variant; 1] = [Variant::SequenceSprint];
        let carousel = Carousel::new(&ONLY);

        assert_eq!(carousel.next().selected(), Variant::SequenceSprint);
        assert_eq!(carousel.prev().selected(), Variant::SequenceSprint);
    }
}
