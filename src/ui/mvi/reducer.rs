use super::intent::Intent;
use super::state::UiState;

/// The only place state transitions happen.
///
/// Must stay free of side effects; bridge requests are issued by the
/// caller around the dispatch.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
