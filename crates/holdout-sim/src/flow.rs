//! Game state machine.
//!
//! Transitions are a pure table; the engine commits the new state and then
//! queues the entry notifications returned here.

use holdout_core::enums::GameState;
use holdout_core::events::Notification;

/// Something that may move the game to a new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowTrigger {
    Start,
    WaveCleared,
    StartNextWave,
    SequenceExhausted,
    GameOver,
    Reset,
}

/// Target state for `trigger` in `current`, or `None` if the pair is not a
/// transition (including re-entering the current state).
pub fn next_state(current: GameState, trigger: FlowTrigger) -> Option<GameState> {
    use GameState::*;

    let next = match (current, trigger) {
        (_, FlowTrigger::Reset) => Ready,
        (Ready, FlowTrigger::Start) => WaveInProgress,
        (WaveInProgress, FlowTrigger::WaveCleared) => UpgradeTime,
        (UpgradeTime, FlowTrigger::StartNextWave) => WaveInProgress,
        (WaveInProgress, FlowTrigger::SequenceExhausted) => GameOver,
        (Ready | WaveInProgress | UpgradeTime, FlowTrigger::GameOver) => GameOver,
        _ => return None,
    };
    (next != current).then_some(next)
}

/// Notifications emitted on entering `state`, in order.
pub fn entry_notifications(state: GameState) -> Vec<Notification> {
    let mut out = vec![Notification::StateChanged { state }];
    match state {
        GameState::Ready => {}
        GameState::WaveInProgress => out.push(Notification::WaveStarted),
        GameState::UpgradeTime => {
            out.push(Notification::WaveCleared);
            out.push(Notification::UpgradeTimeStarted);
        }
        GameState::GameOver => out.push(Notification::GameOver),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use GameState::*;

    #[test]
    fn happy_path() {
        assert_eq!(next_state(Ready, FlowTrigger::Start), Some(WaveInProgress));
        assert_eq!(
            next_state(WaveInProgress, FlowTrigger::WaveCleared),
            Some(UpgradeTime)
        );
        assert_eq!(
            next_state(UpgradeTime, FlowTrigger::StartNextWave),
            Some(WaveInProgress)
        );
        assert_eq!(
            next_state(WaveInProgress, FlowTrigger::SequenceExhausted),
            Some(GameOver)
        );
    }

    #[test]
    fn game_over_is_terminal_except_for_reset() {
        for trigger in [
            FlowTrigger::Start,
            FlowTrigger::WaveCleared,
            FlowTrigger::StartNextWave,
            FlowTrigger::SequenceExhausted,
            FlowTrigger::GameOver,
        ] {
            assert_eq!(next_state(GameOver, trigger), None, "{trigger:?}");
        }
        assert_eq!(next_state(GameOver, FlowTrigger::Reset), Some(Ready));
    }

    #[test]
    fn explicit_game_over_from_any_live_state() {
        for state in [Ready, WaveInProgress, UpgradeTime] {
            assert_eq!(next_state(state, FlowTrigger::GameOver), Some(GameOver));
        }
    }

    #[test]
    fn invalid_pairs_are_rejected() {
        assert_eq!(next_state(Ready, FlowTrigger::WaveCleared), None);
        assert_eq!(next_state(Ready, FlowTrigger::StartNextWave), None);
        assert_eq!(next_state(UpgradeTime, FlowTrigger::WaveCleared), None);
        assert_eq!(next_state(WaveInProgress, FlowTrigger::Start), None);
        assert_eq!(next_state(UpgradeTime, FlowTrigger::SequenceExhausted), None);
        assert_eq!(next_state(Ready, FlowTrigger::Reset), None);
    }

    #[test]
    fn upgrade_time_entry_order() {
        assert_eq!(
            entry_notifications(UpgradeTime),
            vec![
                Notification::StateChanged { state: UpgradeTime },
                Notification::WaveCleared,
                Notification::UpgradeTimeStarted,
            ]
        );
        assert_eq!(
            entry_notifications(Ready),
            vec![Notification::StateChanged { state: Ready }]
        );
    }
}
