//! Single-line terminal readout
//!
//! Rewrites the current line with `\r` and only touches the terminal when
//! the frame actually changes.

use std::io::{self, Stdout, Write};

use ding_core::{Clock, Frame, Readout};

pub const ALERT_TEXT: &str = "Ding!";

pub struct TerminalReadout<W: Write> {
    out: W,
    last: Option<Frame>,
    write_failed: bool,
}

impl TerminalReadout<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalReadout<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: None,
            write_failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn show(&mut self, frame: Frame) {
        if self.last == Some(frame) {
            return;
        }
        self.last = Some(frame);

        let result = match frame {
            Frame::Time(clock) => write!(self.out, "\r{clock}   "),
            Frame::Alert => write!(self.out, "\r{ALERT_TEXT:<8}   "),
        }
        .and_then(|()| self.out.flush());

        if let Err(e) = result {
            if !self.write_failed {
                self.write_failed = true;
                tracing::warn!(error = %e, "failed to write readout");
            }
        }
    }
}

impl<W: Write> Readout for TerminalReadout<W> {
    fn draw_time(&mut self, clock: Clock) {
        self.show(Frame::Time(clock));
    }

    fn draw_alert(&mut self) {
        self.show(Frame::Alert);
    }

    fn finish(&mut self) {
        if self.last.is_some() {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(readout: TerminalReadout<Vec<u8>>) -> String {
        String::from_utf8(readout.into_inner()).unwrap()
    }

    #[test]
    fn draws_clock_once_per_change() {
        let mut readout = TerminalReadout::new(Vec::new());
        readout.draw_time(Clock::from_secs(3661));
        readout.draw_time(Clock::from_secs(3661));
        readout.draw_time(Clock::from_secs(3660));
        assert_eq!(output(readout), "\r01:01:01   \r01:01:00   ");
    }

    #[test]
    fn alert_replaces_clock() {
        let mut readout = TerminalReadout::new(Vec::new());
        readout.draw_time(Clock::from_secs(0));
        readout.draw_alert();
        readout.draw_alert();
        readout.finish();
        assert_eq!(output(readout), "\r00:00:00   \rDing!      \n");
    }

    #[test]
    fn finish_without_frames_writes_nothing() {
        let mut readout = TerminalReadout::new(Vec::new());
        readout.finish();
        assert_eq!(output(readout), "");
    }
}
