//! Navigation resolver.
//!
//! Maps raw navigation input (taps, arrow requests, natural timeouts) to a
//! decision relative to the current position in the sequence. Pure and
//! stateless: the state machine applies the decision.

/// Navigation input reaching the resolver.
///
/// Long presses never show up here; they route to the input gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    TapLeft,
    TapRight,
    ArrowNext,
    ArrowPrev,
    /// Natural completion of the current item
    Timeout,
}

/// What the state machine should do with a navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Advance,
    Retreat,
    /// Advance requested on the last item
    EndOfSequence,
    /// Retreat requested on the first item
    StartOfSequence,
    NoOp,
}

/// Classify a tap by its horizontal position.
///
/// Taps left of `split_ratio * width` go back, everything else goes forward.
/// A zero width view cannot be hit-tested and counts as a forward tap.
///
/// # Arguments
/// * `x` - Tap position from the left edge
/// * `width` - Width of the tappable area
/// * `split_ratio` - Fraction of the width that belongs to the left zone
pub fn classify_tap(x: f64, width: f64, split_ratio: f64) -> NavEvent {
    if width <= 0.0 {
        return NavEvent::TapRight;
    }
    if x < width * split_ratio {
        NavEvent::TapLeft
    } else {
        NavEvent::TapRight
    }
}

/// Resolve a navigation event at `index` within a sequence of `len` items.
///
/// Returns `NoOp` when there is nothing to navigate (`len == 0`) or the
/// index is already out of range.
pub fn resolve(event: NavEvent, index: usize, len: usize) -> Decision {
    if len == 0 || index >= len {
        return Decision::NoOp;
    }

    match event {
        NavEvent::TapRight | NavEvent::ArrowNext | NavEvent::Timeout => {
            if index + 1 >= len {
                Decision::EndOfSequence
            } else {
                Decision::Advance
            }
        }
        NavEvent::TapLeft | NavEvent::ArrowPrev => {
            if index == 0 {
                Decision::StartOfSequence
            } else {
                Decision::Retreat
            }
        }
    }
}
