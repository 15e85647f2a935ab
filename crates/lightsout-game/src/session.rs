//! Game orchestration: lifecycle, riddle setup, win detection, and the
//! signal boundary to the view.

use std::{fmt, time::Duration};

use derive_more::{Display, Error, From, IsVariant};
use lightsout_core::{Grid, GridError, Position};
use lightsout_generator::{GeneratedRiddle, RiddleGenerator};
use log::{debug, info};

use crate::{
    Clock, Counter, DEFAULT_FIELD_SIZE, DEFAULT_RIDDLE_DIFFICULTY, DEFAULT_TICK_INTERVAL, Signal,
    TickSource,
};

/// Errors surfaced by the game session.
#[derive(Debug, Display, Error, From, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The playing field could not be bound to the view's cell sources.
    #[display("cannot bind the playing field: {_0}")]
    Field(GridError),
}

/// High-level lifecycle state of a session.
///
/// A win and a user-initiated stop both land in [`Stopped`](Self::Stopped);
/// they differ only in the events emitted on the way there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum GameStatus {
    /// No game has been started yet; the field is still unwired.
    NotStarted,
    /// A riddle is active and the clock is ticking.
    Running,
    /// The game ended, through a win or a stop request.
    Stopped,
}

/// Configuration fixed at session construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Side length of the square playing field.
    pub field_size: u8,
    /// Number of scramble presses per riddle.
    pub riddle_difficulty: u32,
    /// Interval the external timer driver should tick the clock at.
    pub tick_interval: Duration,
    /// Pins the riddle seed for deterministic sessions; `None` draws a fresh
    /// seed per game.
    pub riddle_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_size: DEFAULT_FIELD_SIZE,
            riddle_difficulty: DEFAULT_RIDDLE_DIFFICULTY,
            tick_interval: DEFAULT_TICK_INTERVAL,
            riddle_seed: None,
        }
    }
}

/// Supplies the row-major cell widgets backing the playing field.
///
/// The view implements this; the session consults it lazily on first start
/// and only for the sequence length, since cell adjacency derives from
/// coordinates alone.
pub trait FieldSource {
    /// Number of cell widgets the view provides, in row-major order.
    fn cell_count(&self) -> usize;
}

/// One cell's state after a cascade or bulk reset, for view synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeChange {
    /// The cell that changed.
    pub position: Position,
    /// Its new state.
    pub is_on: bool,
}

/// Command for the win popup collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupCommand {
    /// Make the popup visible.
    Show,
    /// Hide the popup.
    Hide,
}

/// The signals a session exposes to its view collaborators.
///
/// All dispatch is synchronous and single-threaded; subscriptions die with
/// the session.
#[derive(Debug, Default)]
pub struct SessionSignals {
    /// `true` while a game is running; views enable interaction and relabel
    /// their start/stop control from this.
    pub running: Signal<bool>,
    /// Current press-counter value, for display.
    pub counter: Signal<u32>,
    /// Current elapsed seconds, for display (formatted externally).
    pub clock: Signal<u32>,
    /// Per-cell state updates after cascades, riddle setup, and bulk resets.
    pub nodes: Signal<NodeChange>,
    /// Show/hide commands for the win popup.
    pub popup: Signal<PopupCommand>,
}

/// A Lights-Out game session.
///
/// The session is the single source of truth for game state: it owns the
/// grid, the clock, the press counter, and the riddle generator, and it
/// coordinates them through the not-started, running, and stopped lifecycle
/// states. All view communication flows through [`SessionSignals`] and the
/// `handle_*` entry points; everything runs synchronously on the caller's
/// thread.
///
/// # Examples
///
/// ```
/// use lightsout_core::Position;
/// use lightsout_game::{FieldSource, GameConfig, GameSession};
///
/// struct Field;
/// impl FieldSource for Field {
///     fn cell_count(&self) -> usize {
///         25
///     }
/// }
///
/// let mut session = GameSession::new(GameConfig::default(), Box::new(Field));
/// session.handle_start_request(true).unwrap();
/// assert!(session.is_running());
///
/// // A press flips the cell and its neighbors and bumps the counter.
/// let pos = Position::new(2, 2);
/// session.handle_cell_pressed(pos, !session.node_state(pos));
/// assert_eq!(session.counter_value(), 1);
/// ```
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    clock: Clock,
    counter: Counter,
    generator: RiddleGenerator,
    status: GameStatus,
    field: Box<dyn FieldSource>,
    signals: SessionSignals,
    tick_source: Option<TickSource>,
    last_riddle: Option<GeneratedRiddle>,
}

impl GameSession {
    /// Creates a session in the [`GameStatus::NotStarted`] state.
    ///
    /// The field source is consulted lazily: the grid is wired on the first
    /// start request, not here.
    ///
    /// # Panics
    ///
    /// Panics if `config.field_size` is 0.
    #[must_use]
    pub fn new(config: GameConfig, field: Box<dyn FieldSource>) -> Self {
        Self {
            grid: Grid::new(config.field_size),
            clock: Clock::new(config.tick_interval),
            counter: Counter::new(),
            generator: RiddleGenerator::new(config.riddle_difficulty),
            status: GameStatus::NotStarted,
            field,
            signals: SessionSignals::default(),
            tick_source: None,
            last_riddle: None,
            config,
        }
    }

    /// Handles the start/stop control of the view.
    ///
    /// `start == true` starts a game unless one is already running (a
    /// running game makes this a no-op: no duplicate riddle, no duplicate
    /// tick stream). `start == false` clears the screen data and stops a
    /// running game; stopping while not running is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Field`] if the view supplies fewer cell widgets
    /// than the field has cells. This is only possible on the first start,
    /// before the grid is wired.
    pub fn handle_start_request(&mut self, start: bool) -> Result<(), GameError> {
        if start {
            if self.status.is_running() {
                debug!("start requested while already running; ignored");
                return Ok(());
            }
            self.start_game()
        } else {
            if self.status.is_running() {
                self.clean_screen_data();
                self.stop_game();
            }
            Ok(())
        }
    }

    /// Handles the restart control of the win popup.
    ///
    /// Equivalent to stop-then-start: hides the popup, clears the screen
    /// data, and re-enters the start path with a fresh riddle and a
    /// restarted clock — even if the previous game was already solved.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Field`] under the same conditions as
    /// [`handle_start_request`](Self::handle_start_request).
    pub fn handle_restart_request(&mut self) -> Result<(), GameError> {
        self.signals.popup.emit(&PopupCommand::Hide);
        self.clean_screen_data();
        if self.status.is_running() {
            self.stop_game();
        }
        self.start_game()
    }

    /// Handles a player press on the cell at `pos`.
    ///
    /// `is_on` is the new state of the pressed widget. Ignored unless a game
    /// is running. Otherwise: counts the press, runs the one-hop cascade,
    /// publishes the changed cells, and performs exactly one win recheck.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the playing field.
    pub fn handle_cell_pressed(&mut self, pos: Position, is_on: bool) {
        if !self.status.is_running() {
            return;
        }

        self.counter.add_value();
        let count = self.counter.value();
        self.signals.counter.emit(&count);

        let changed = self.grid.activate(pos, is_on);
        debug!("press at {pos} changed {} cells", changed.len());
        for position in changed {
            let change = NodeChange {
                position,
                is_on: self.grid.node_state(position),
            };
            self.signals.nodes.emit(&change);
        }

        self.recheck_win_condition();
    }

    /// Re-evaluates the win condition.
    ///
    /// Ignored entirely unless a game is running, which shields the session
    /// from stray signals while stopped. On a solved field this shows the
    /// win popup and runs the stop path; the forced all-off reset in there
    /// is redundant after a win, but cheap and idempotent.
    pub fn recheck_win_condition(&mut self) {
        if !self.status.is_running() {
            return;
        }
        if !self.grid.is_solved() {
            return;
        }
        info!("riddle solved after {} presses", self.counter.value());
        self.signals.popup.emit(&PopupCommand::Show);
        self.stop_game();
    }

    /// Forwards one tick from the external timer driver.
    ///
    /// Ticks from cancelled streams are dropped silently; counted ticks are
    /// republished on the clock signal.
    pub fn handle_clock_tick(&mut self, source: TickSource) {
        if self.clock.tick(source) {
            let elapsed = self.clock.elapsed();
            self.signals.clock.emit(&elapsed);
        }
    }

    /// Returns the signals for subscribing and unsubscribing view
    /// collaborators.
    pub fn signals_mut(&mut self) -> &mut SessionSignals {
        &mut self.signals
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns whether a game is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Returns the current press count.
    #[must_use]
    pub fn counter_value(&self) -> u32 {
        self.counter.value()
    }

    /// Returns the elapsed gameplay time in seconds.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.clock.elapsed()
    }

    /// Returns the state of the cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the playing field.
    #[must_use]
    pub fn node_state(&self, pos: Position) -> bool {
        self.grid.node_state(pos)
    }

    /// Returns the tick stream handle of the running game, if any.
    ///
    /// The external timer driver presents this with every tick.
    #[must_use]
    pub fn tick_source(&self) -> Option<TickSource> {
        self.tick_source
    }

    /// Returns the session configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the riddle of the current (or last) game.
    #[must_use]
    pub fn last_riddle(&self) -> Option<&GeneratedRiddle> {
        self.last_riddle.as_ref()
    }

    fn start_game(&mut self) -> Result<(), GameError> {
        if !self.grid.is_built() {
            self.grid.build(self.field.cell_count())?;
        }

        let riddle = match self.config.riddle_seed {
            Some(seed) => self.generator.generate_with_seed(&mut self.grid, seed),
            None => self.generator.generate(&mut self.grid),
        };
        info!(
            "game started: riddle seed {} ({} presses)",
            riddle.seed,
            riddle.picks.len(),
        );
        self.last_riddle = Some(riddle);
        self.publish_field_state();

        self.tick_source = Some(self.clock.start());
        self.status = GameStatus::Running;
        self.signals.running.emit(&true);
        Ok(())
    }

    fn stop_game(&mut self) {
        self.clock.stop();
        self.tick_source = None;
        self.grid.reset_all(false);
        self.publish_field_state();
        self.status = GameStatus::Stopped;
        self.signals.running.emit(&false);
        info!("game stopped");
    }

    fn clean_screen_data(&mut self) {
        self.clock.clear();
        self.counter.clear();
        self.signals.clock.emit(&0);
        self.signals.counter.emit(&0);
    }

    fn publish_field_state(&mut self) {
        for position in self.grid.positions() {
            let change = NodeChange {
                position,
                is_on: self.grid.node_state(position),
            };
            self.signals.nodes.emit(&change);
        }
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("status", &self.status)
            .field("field_size", &self.grid.size())
            .field("counter", &self.counter.value())
            .field("elapsed", &self.clock.elapsed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    struct TestField {
        cells: usize,
    }

    impl FieldSource for TestField {
        fn cell_count(&self) -> usize {
            self.cells
        }
    }

    fn session_with(config: GameConfig, cells: usize) -> GameSession {
        GameSession::new(config, Box::new(TestField { cells }))
    }

    fn seeded_session() -> GameSession {
        let config = GameConfig {
            riddle_seed: Some(11),
            ..GameConfig::default()
        };
        session_with(config, 25)
    }

    /// Session whose riddle is empty, so the field starts all-off and every
    /// cascade is fully predictable.
    fn unscrambled_session() -> GameSession {
        let config = GameConfig {
            riddle_difficulty: 0,
            riddle_seed: Some(1),
            ..GameConfig::default()
        };
        session_with(config, 25)
    }

    /// Session with a one-press riddle: replaying the single pick always
    /// solves it, whatever the seed produced.
    fn one_press_session() -> GameSession {
        let config = GameConfig {
            riddle_difficulty: 1,
            riddle_seed: Some(11),
            ..GameConfig::default()
        };
        session_with(config, 25)
    }

    fn press(session: &mut GameSession, pos: Position) {
        let next = !session.node_state(pos);
        session.handle_cell_pressed(pos, next);
    }

    #[test]
    fn test_new_session_is_not_started() {
        let session = seeded_session();
        assert_eq!(session.status(), GameStatus::NotStarted);
        assert!(!session.is_running());
        assert!(session.tick_source().is_none());
        assert!(session.last_riddle().is_none());
    }

    #[test]
    fn test_start_transitions_to_running_and_emits() {
        let running = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&running);

        let mut session = seeded_session();
        session
            .signals_mut()
            .running
            .subscribe(move |value: &bool| sink.borrow_mut().push(*value));

        session.handle_start_request(true).unwrap();
        assert!(session.is_running());
        assert_eq!(*running.borrow(), vec![true]);

        let riddle = session.last_riddle().expect("riddle was generated");
        assert_eq!(riddle.picks.len(), 3);
        assert_eq!(riddle.seed, 11);
    }

    #[test]
    fn test_start_while_running_is_a_no_op() {
        let mut session = seeded_session();
        session.handle_start_request(true).unwrap();
        let source = session.tick_source().expect("clock started");
        let riddle = session.last_riddle().cloned();

        session.handle_start_request(true).unwrap();

        // Same tick stream, same riddle: no duplicate start happened.
        assert_eq!(session.tick_source(), Some(source));
        assert_eq!(session.last_riddle().cloned(), riddle);
    }

    #[test]
    fn test_first_start_fails_fast_on_short_field() {
        let mut session = session_with(GameConfig::default(), 24);
        let result = session.handle_start_request(true);
        assert_eq!(
            result,
            Err(GameError::Field(GridError::InsufficientCellSources {
                expected: 25,
                actual: 24,
            }))
        );
        assert_eq!(session.status(), GameStatus::NotStarted);
    }

    #[test]
    fn test_press_counts_and_cascades() {
        let counts = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&counts);

        let mut session = unscrambled_session();
        session
            .signals_mut()
            .counter
            .subscribe(move |value: &u32| sink.borrow_mut().push(*value));
        session.handle_start_request(true).unwrap();

        press(&mut session, Position::new(2, 2));
        press(&mut session, Position::new(0, 0));
        assert_eq!(session.counter_value(), 2);
        assert_eq!(*counts.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_press_before_start_is_ignored() {
        let mut session = seeded_session();
        session.handle_cell_pressed(Position::new(2, 2), true);
        assert_eq!(session.counter_value(), 0);
    }

    #[test]
    fn test_stop_forces_all_cells_off_and_clears_screen_data() {
        let mut session = unscrambled_session();
        session.handle_start_request(true).unwrap();
        let source = session.tick_source().expect("clock started");
        session.handle_clock_tick(source);
        press(&mut session, Position::new(1, 1));

        session.handle_start_request(false).unwrap();

        assert_eq!(session.status(), GameStatus::Stopped);
        assert!(!session.is_running());
        assert_eq!(session.counter_value(), 0);
        assert_eq!(session.elapsed_seconds(), 0);
        let grid_positions: Vec<Position> = (0..5)
            .flat_map(|y| (0..5).map(move |x| Position::new(x, y)))
            .collect();
        assert!(grid_positions.iter().all(|pos| !session.node_state(*pos)));

        // The cancelled stream can no longer advance the clock.
        session.handle_clock_tick(source);
        assert_eq!(session.elapsed_seconds(), 0);
    }

    #[test]
    fn test_stop_while_not_running_is_a_no_op() {
        let running = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&running);

        let mut session = seeded_session();
        session
            .signals_mut()
            .running
            .subscribe(move |value: &bool| sink.borrow_mut().push(*value));

        session.handle_start_request(false).unwrap();
        assert_eq!(session.status(), GameStatus::NotStarted);
        assert!(running.borrow().is_empty());
    }

    #[test]
    fn test_replaying_the_riddle_wins_the_game() {
        let popups = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&popups);

        let mut session = one_press_session();
        session
            .signals_mut()
            .popup
            .subscribe(move |command: &PopupCommand| sink.borrow_mut().push(*command));
        session.handle_start_request(true).unwrap();

        let picks = session.last_riddle().expect("riddle exists").picks.clone();
        assert_eq!(picks.len(), 1);
        for pick in picks {
            press(&mut session, pick);
        }

        // Replaying every scramble press unwinds the riddle; the session
        // detects the win, shows the popup, and stops.
        assert_eq!(session.status(), GameStatus::Stopped);
        assert!(!session.is_running());
        assert_eq!(*popups.borrow(), vec![PopupCommand::Show]);
        assert!(session.tick_source().is_none());
    }

    #[test]
    fn test_presses_after_win_are_ignored() {
        let mut session = one_press_session();
        session.handle_start_request(true).unwrap();
        let picks = session.last_riddle().expect("riddle exists").picks.clone();
        for pick in picks {
            press(&mut session, pick);
        }
        let count = session.counter_value();

        press(&mut session, Position::new(2, 2));
        assert_eq!(session.counter_value(), count);
        assert!(!session.node_state(Position::new(2, 2)));
    }

    #[test]
    fn test_stray_recheck_while_stopped_shows_no_popup() {
        let popups = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&popups);

        let mut session = seeded_session();
        session
            .signals_mut()
            .popup
            .subscribe(move |command: &PopupCommand| sink.borrow_mut().push(*command));
        session.handle_start_request(true).unwrap();
        session.handle_start_request(false).unwrap();

        // The field is all-off after the stop, but the guard must win.
        session.recheck_win_condition();
        assert!(popups.borrow().is_empty());
    }

    #[test]
    fn test_restart_clears_data_and_regenerates() {
        let popups = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&popups);

        let mut session = unscrambled_session();
        session
            .signals_mut()
            .popup
            .subscribe(move |command: &PopupCommand| sink.borrow_mut().push(*command));
        session.handle_start_request(true).unwrap();
        let source = session.tick_source().expect("clock started");
        session.handle_clock_tick(source);
        press(&mut session, Position::new(3, 3));

        session.handle_restart_request().unwrap();

        assert!(session.is_running());
        assert_eq!(session.counter_value(), 0);
        assert_eq!(session.elapsed_seconds(), 0);
        assert_eq!(*popups.borrow(), vec![PopupCommand::Hide]);
        assert!(session.last_riddle().is_some());
        // The restart handed out a fresh tick stream.
        assert_ne!(session.tick_source(), Some(source));
    }

    #[test]
    fn test_restart_after_win_starts_a_fresh_game() {
        let mut session = one_press_session();
        session.handle_start_request(true).unwrap();
        let picks = session.last_riddle().expect("riddle exists").picks.clone();
        for pick in picks {
            press(&mut session, pick);
        }
        assert_eq!(session.status(), GameStatus::Stopped);

        session.handle_restart_request().unwrap();
        assert!(session.is_running());
        assert_eq!(session.counter_value(), 0);
    }

    #[test]
    fn test_clock_ticks_are_republished() {
        let seconds = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seconds);

        let mut session = seeded_session();
        session
            .signals_mut()
            .clock
            .subscribe(move |value: &u32| sink.borrow_mut().push(*value));
        session.handle_start_request(true).unwrap();

        let source = session.tick_source().expect("clock started");
        session.handle_clock_tick(source);
        session.handle_clock_tick(source);
        assert_eq!(*seconds.borrow(), vec![1, 2]);
        assert_eq!(session.elapsed_seconds(), 2);
    }

    #[test]
    fn test_node_changes_are_published_per_press() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);

        let mut session = unscrambled_session();
        session.handle_start_request(true).unwrap();
        session
            .signals_mut()
            .nodes
            .subscribe(move |change: &NodeChange| sink.borrow_mut().push(*change));

        press(&mut session, Position::new(0, 0));
        // Corner press: the cell itself plus two neighbors, all turned on.
        let seen = changes.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].position, Position::new(0, 0));
        assert!(seen.iter().all(|change| change.is_on));
    }
}
