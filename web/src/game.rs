use core::time::Duration;
use gloo::timers::callback::Timeout;
use memgrid_core as game;
use web_time::Instant;
use yew::prelude::*;

use crate::utils::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Screen {
    Start,
    Playing,
    End,
}

impl From<game::SessionPhase> for Screen {
    fn from(phase: game::SessionPhase) -> Self {
        use game::SessionPhase::*;
        match phase {
            NotStarted => Screen::Start,
            Running => Screen::Playing,
            Ended => Screen::End,
        }
    }
}

/// Milliseconds until `due`, as `gloo` timers want them.
fn wake_delay_ms(due: Duration, now: Duration) -> u32 {
    due.saturating_sub(now)
        .as_millis()
        .try_into()
        .unwrap_or(u32::MAX)
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start,
    CellClick(game::CellIndex),
    Wake,
    ReturnToMain,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    index: game::CellIndex,
    cell: game::CellView,
    #[prop_or_default]
    clickable: bool,
    callback: Callback<game::CellIndex>,
}

#[function_component(GridCell)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        index,
        cell,
        clickable,
        callback,
    } = props.clone();

    let class = classes!(
        "cell",
        cell.visual.class_name(),
        cell.label.is_some().then_some("showing-number"),
        clickable.then_some("clickable"),
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("cell {} clicked", index);
        callback.emit(index);
    });

    html! {
        <div {class} {onclick}>
            { cell.label.map(|label| label.to_string()).unwrap_or_default() }
        </div>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub variant: game::Variant,
    #[prop_or_default]
    pub seed: Option<u64>,
    #[prop_or_default]
    pub duration: Option<u32>,
    #[prop_or_default]
    pub mainpage_url: Option<AttrValue>,
}

pub(crate) struct GameView {
    session: game::Session,
    epoch: Instant,
    _wake: Option<Timeout>,
}

impl GameView {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    /// Arms a single browser timeout for the next due task; replacing the old one cancels it.
    fn arm_wake(&mut self, ctx: &Context<Self>) {
        let now = self.now();
        self._wake = self.session.next_deadline().map(|due| {
            let link = ctx.link().clone();
            Timeout::new(wake_delay_ms(due, now), move || link.send_message(Msg::Wake))
        });
    }

    fn drain_events(&mut self) -> bool {
        use game::SessionEvent::*;

        let events = self.session.take_events();
        for event in &events {
            match event {
                RoundEnded(outcome) => log::info!(
                    "round {:?}, level {}, score {}",
                    outcome,
                    self.session.level(),
                    self.session.score()
                ),
                SessionEnded { final_score } => log::info!("time's up, final score {}", final_score),
                GridNeeded { shape } => log::debug!("new {}x{} grid", shape.rows, shape.cols),
                _ => log::trace!("{:?}", event),
            }
        }
        !events.is_empty()
    }

    fn return_button(&self, ctx: &Context<Self>) -> Html {
        if ctx.props().mainpage_url.is_none() {
            return html! {};
        }
        let onclick = ctx.link().callback(|_: MouseEvent| Msg::ReturnToMain);
        html! {
            <button class="mainpage" {onclick}>{"Back to main page"}</button>
        }
    }

    fn view_start(&self, ctx: &Context<Self>) -> Html {
        let variant = ctx.props().variant;
        let onclick = ctx.link().callback(|_: MouseEvent| Msg::Start);
        html! {
            <section class="start-screen">
                <h1>{variant.icon()}{" "}{variant.display_name()}</h1>
                <button class="start" {onclick}>{"Start"}</button>
                { self.return_button(ctx) }
            </section>
        }
    }

    fn view_playing(&self, ctx: &Context<Self>) -> Html {
        let board = self.session.board();
        let shape = board.shape();
        let clickable = self.session.is_accepting_input();
        let callback = ctx.link().callback(Msg::CellClick);
        let grid_style = format!("grid-template-columns: repeat({}, 1fr)", shape.cols);

        html! {
            <section class="game-screen">
                <nav>
                    <aside class="level">{"Level "}{self.session.level()}</aside>
                    <aside class="score">{"Score "}{self.session.score()}</aside>
                    <aside class="time">{self.session.remaining_time_formatted()}</aside>
                </nav>
                <div class={classes!("grid", clickable.then_some("playable"))} style={grid_style}>
                    {
                        for board.iter().map(|(index, cell)| {
                            let callback = callback.clone();
                            html! {
                                <GridCell {index} {cell} {clickable} {callback}/>
                            }
                        })
                    }
                </div>
                <p class="hint">{self.session.hint().to_string()}</p>
            </section>
        }
    }

    fn view_end(&self, ctx: &Context<Self>) -> Html {
        let onclick = ctx.link().callback(|_: MouseEvent| Msg::Start);
        html! {
            <section class="end-screen">
                <h2>{"Time's up!"}</h2>
                <p class="final-score">{"Final score: "}{self.session.score()}</p>
                <button class="restart" {onclick}>{"Restart"}</button>
                { self.return_button(ctx) }
            </section>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut rules = props.variant.rules();
        if let Some(duration) = props.duration {
            rules = rules.with_session_secs(duration);
        }
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        Self {
            session: game::Session::new(rules, game::RandomSequenceGenerator::new(seed)),
            epoch: Instant::now(),
            _wake: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        // due timers fire before the message is handled
        self.session.advance_to(self.now());

        match msg {
            Start => {
                log::debug!("new session");
                self.session.restart();
            }
            CellClick(index) => {
                let outcome = self.session.handle_cell_click(index);
                if outcome.has_update() {
                    log::debug!("click on {}: {:?}", index, outcome);
                } else {
                    log::trace!("click on {} changed nothing", index);
                }
            }
            Wake => {}
            ReturnToMain => {
                if let Some(url) = ctx.props().mainpage_url.as_deref() {
                    navigate_to(url);
                }
                return false;
            }
        }

        let updated = self.drain_events();
        self.arm_wake(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let variant = ctx.props().variant;
        let screen = Screen::from(self.session.phase());

        html! {
            <div class={classes!("memgrid", variant.id())}>
                {
                    match screen {
                        Screen::Start => self.view_start(ctx),
                        Screen::Playing => self.view_playing(ctx),
                        Screen::End => self.view_end(ctx),
                    }
                }
            </div>
        }
    }
}
