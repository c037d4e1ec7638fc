//! Round-by-round tracing of the cipher pipelines.
//!
//! Tracing is opt-in per call: the traced pipeline variants take a
//! [`TraceSink`] that receives one line per step, without a line terminator.
//! Lines follow the FIPS-197 Appendix C layout, e.g.
//! `round[ 1].s_box 63cab7040953d051cd60e0e7ba70e18c`.

use core::fmt;

use crate::state::State;

/// Receives formatted trace lines.
pub trait TraceSink {
    /// Consumes one line.
    fn line(&mut self, args: fmt::Arguments<'_>);
}

/// Discards every line; nothing is formatted.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl TraceSink for Silent {
    #[inline]
    fn line(&mut self, _args: fmt::Arguments<'_>) {}
}

impl TraceSink for Vec<String> {
    fn line(&mut self, args: fmt::Arguments<'_>) {
        self.push(args.to_string());
    }
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn line(&mut self, args: fmt::Arguments<'_>) {
        (**self).line(args);
    }
}

/// Step labels written after `round[rr].`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Cipher input.
    Input,
    /// Round key added in this round.
    KeySchedule,
    /// State at the start of a round.
    Start,
    /// After SubBytes.
    SubBytes,
    /// After ShiftRows.
    ShiftRows,
    /// After MixColumns.
    MixColumns,
    /// Cipher output.
    Output,
    /// Inverse cipher input.
    InvInput,
    /// Round key added in this inverse round.
    InvKeySchedule,
    /// State at the start of an inverse round.
    InvStart,
    /// After InvShiftRows.
    InvShiftRows,
    /// After InvSubBytes.
    InvSubBytes,
    /// After AddRoundKey, before InvMixColumns.
    InvKeyAdd,
    /// Inverse cipher output.
    InvOutput,
}

impl Stage {
    /// The label as it appears in the trace.
    pub const fn label(self) -> &'static str {
        match self {
            Stage::Input => "input",
            Stage::KeySchedule => "k_sch",
            Stage::Start => "start",
            Stage::SubBytes => "s_box",
            Stage::ShiftRows => "s_row",
            Stage::MixColumns => "m_col",
            Stage::Output => "output",
            Stage::InvInput => "iinput",
            Stage::InvKeySchedule => "ik_sch",
            Stage::InvStart => "istart",
            Stage::InvShiftRows => "is_row",
            Stage::InvSubBytes => "is_box",
            Stage::InvKeyAdd => "ik_add",
            Stage::InvOutput => "ioutput",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[inline]
pub(crate) fn step<S: TraceSink + ?Sized>(sink: &mut S, round: usize, stage: Stage, state: &State) {
    sink.line(format_args!("round[{round:2}].{stage} {state}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_numbers_are_padded_to_two_columns() {
        let mut lines: Vec<String> = Vec::new();
        let state = State::from_bytes(&[0u8; 16]);
        step(&mut lines, 0, Stage::Input, &state);
        step(&mut lines, 10, Stage::InvOutput, &state);
        assert_eq!(lines[0], "round[ 0].input 00000000000000000000000000000000");
        assert_eq!(lines[1], "round[10].ioutput 00000000000000000000000000000000");
    }
}
