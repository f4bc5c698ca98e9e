//! Console report formatting
//!
//! The console speaks unstructured newline-terminated text lines; keeping
//! the formatting here lets the exact output be pinned on the host without
//! a UART in the loop.

use core::fmt::{self, Write};

use heapless::String;

/// Maximum length of one console line, terminator included
pub const MAX_LINE_LEN: usize = 48;

/// One console report line
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// Latest single-beat estimate
    Beat(f32),
    /// Running average over the history window
    Average(f32),
    /// One raw history slot (dump mode)
    HistorySlot(f32),
    /// Raw word from the auxiliary serial sensor
    AuxWord(u32),
    /// Presence gate closed or average not trustworthy
    NotDetected,
    /// Edge capture went stale
    NoSignal,
}

impl Report {
    /// Render the newline-terminated console line for this report
    pub fn line(&self) -> Result<String<MAX_LINE_LEN>, fmt::Error> {
        let mut line = String::new();
        match self {
            Report::Beat(bpm) => write!(line, "BPM:\t{:.6}\n", bpm)?,
            Report::Average(avg) => write!(line, "Average BPM: {:.6}\n", avg)?,
            Report::HistorySlot(slot) => write!(line, "{:.6}\n", slot)?,
            Report::AuxWord(word) => write!(line, "{}\n", word)?,
            Report::NotDetected => write!(line, "(not detected)\n")?,
            Report::NoSignal => write!(line, "(no signal)\n")?,
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_line() {
        let line = Report::Average(62.0).line().unwrap();
        assert_eq!(line.as_str(), "Average BPM: 62.000000\n");
    }

    #[test]
    fn test_beat_line() {
        let line = Report::Beat(71.5).line().unwrap();
        assert_eq!(line.as_str(), "BPM:\t71.500000\n");
    }

    #[test]
    fn test_gate_lines() {
        assert_eq!(Report::NotDetected.line().unwrap().as_str(), "(not detected)\n");
        assert_eq!(Report::NoSignal.line().unwrap().as_str(), "(no signal)\n");
    }

    #[test]
    fn test_aux_word_line() {
        let line = Report::AuxWord(0x00AB_CDEF).line().unwrap();
        assert_eq!(line.as_str(), "11259375\n");
    }

    #[test]
    fn test_longest_line_fits() {
        // widest realistic average: three integer digits, six decimals
        let line = Report::Average(149.999_99).line().unwrap();
        assert!(line.len() <= MAX_LINE_LEN);
    }
}
