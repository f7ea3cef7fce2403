//! Browser host bindings
//!
//! Thin wasm-bindgen wrappers around the game state machines. Each handle
//! owns one game instance; the Cartesian game is driven by a
//! `requestAnimationFrame` loop that feeds `performance.now()` into
//! `frame`. State crosses to JS as JSON snapshots; the page re-renders from
//! those rather than holding game state of its own.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::cartesian::{CartesianGame, GamePhase};
use crate::config::Theme;
use crate::element::Element;
use crate::functions::{Difficulty, QuizRound};
use crate::plot::series_style;
use crate::vector::{TargetVector, VectorGame};
use crate::venn::{Origin, Region, VennGame};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("math-arcade initialized");
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn request_frame(closure: &Closure<dyn FnMut()>) {
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

/// Parse an element the page serialized as text: an integer or a single char
fn element_from_str(s: &str) -> Option<Element> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(Element::Num(n));
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(Element::Sym(c)),
        _ => None,
    }
}

/// The Cartesian timed challenge, animated by the browser
#[wasm_bindgen]
pub struct CartesianHandle {
    game: Rc<RefCell<CartesianGame>>,
}

#[wasm_bindgen]
impl CartesianHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Self {
        Self {
            game: Rc::new(RefCell::new(CartesianGame::new(seed))),
        }
    }

    /// Start a round and begin the frame loop. The loop stops itself when
    /// the round is no longer running.
    pub fn start(&self) -> bool {
        let started = self.game.borrow_mut().start(now_ms());
        if started {
            let game = self.game.clone();
            let holder: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
            let reschedule = holder.clone();
            *holder.borrow_mut() = Some(Closure::new(move || {
                let _ = game.borrow_mut().frame(now_ms());
                if game.borrow().phase() == GamePhase::Running {
                    if let Some(closure) = reschedule.borrow().as_ref() {
                        request_frame(closure);
                    }
                }
            }));
            if let Some(closure) = holder.borrow().as_ref() {
                request_frame(closure);
            }
        }
        started
    }

    pub fn select_a(&self, value: i64) -> String {
        self.game.borrow_mut().select_a(value).message().to_string()
    }

    pub fn select_b(&self, value: char) -> String {
        self.game.borrow_mut().select_b(value).message().to_string()
    }

    pub fn submit(&self) -> String {
        self.game.borrow_mut().submit(now_ms()).message()
    }

    pub fn end(&self) -> bool {
        self.game.borrow_mut().end()
    }

    /// Full game state as JSON for the page to render
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.game.borrow().snapshot()).unwrap_or_default()
    }
}

/// Function quiz / construct rounds
#[wasm_bindgen]
pub struct QuizHandle {
    rng: rand_pcg::Pcg32,
    difficulty: Difficulty,
    round: QuizRound,
    theme: Theme,
}

#[wasm_bindgen]
impl QuizHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, difficulty: &str, theme: &str) -> Self {
        use rand::SeedableRng;
        let difficulty = match difficulty {
            "hard" => Difficulty::Hard,
            "medium" => Difficulty::Medium,
            _ => Difficulty::Easy,
        };
        let mut rng = rand_pcg::Pcg32::seed_from_u64(seed);
        let round = QuizRound::generate(&mut rng, difficulty);
        Self {
            rng,
            difficulty,
            round,
            theme: Theme::from_str(theme).unwrap_or_default(),
        }
    }

    /// Current options (equation strings) as a JSON array
    pub fn options(&self) -> String {
        let equations: Vec<&str> = self
            .round
            .options
            .iter()
            .map(|o| o.equation.as_str())
            .collect();
        serde_json::to_string(&equations).unwrap_or_default()
    }

    pub fn choose(&self, option_index: usize) -> bool {
        self.round.is_correct(option_index)
    }

    pub fn next_round(&mut self) {
        self.round = QuizRound::generate(&mut self.rng, self.difficulty);
    }

    /// Plot series for one option, styled for the current theme
    pub fn series(&self, option_index: usize) -> String {
        let Some(option) = self.round.options.get(option_index) else {
            return String::new();
        };
        let series = option.sample_points(series_style(option.kind, self.theme));
        serde_json::to_string(&series).unwrap_or_default()
    }
}

/// Venn classification game
#[wasm_bindgen]
pub struct VennHandle {
    game: VennGame,
}

#[wasm_bindgen]
impl VennHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            game: VennGame::with_standard_problems(),
        }
    }

    /// Forward a drop: `(dragged element, source region id)` from the
    /// drag-and-drop surface. Empty source means the available pool.
    pub fn place(&mut self, element: &str, target_region: &str, source_region: &str) -> bool {
        let (Some(element), Some(target)) =
            (element_from_str(element), Region::from_id(target_region))
        else {
            return false;
        };
        let origin = match Region::from_id(source_region) {
            Some(r) => Origin::Region(r),
            None => Origin::Available,
        };
        self.game.place(element, target, origin) == crate::venn::PlaceOutcome::Moved
    }

    pub fn check(&mut self) -> String {
        self.game.check_answer().message()
    }

    pub fn score(&self) -> u32 {
        self.game.score()
    }

    pub fn description(&self) -> String {
        self.game.problem().description.clone()
    }

    pub fn placement(&self) -> String {
        serde_json::to_string(self.game.placement()).unwrap_or_default()
    }
}

impl Default for VennHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Vector decomposition game
#[wasm_bindgen]
pub struct VectorHandle {
    game: VectorGame,
}

#[wasm_bindgen]
impl VectorHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, difficulty: u32) -> Self {
        Self {
            game: VectorGame::new(seed, difficulty),
        }
    }

    pub fn target_x(&self) -> f64 {
        self.game.target().x
    }

    pub fn target_y(&self) -> f64 {
        self.game.target().y
    }

    pub fn submit(&mut self, x: f64, y: f64) -> String {
        self.game.submit(TargetVector::new(x, y)).message().to_string()
    }

    pub fn score(&self) -> u32 {
        self.game.score()
    }
}
