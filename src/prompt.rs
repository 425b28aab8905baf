use anyhow::{bail, Result};
use std::io::{BufRead, Write};

use crate::error::{DspError, DspResult};

/// Line-based interactive input. Invalid entries are reported and asked again.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}\n> ", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("Input closed while waiting for: {}", label);
        }
        Ok(line.trim().to_string())
    }

    /// Keep asking until `attempt` succeeds. Only `InvalidUserInput` is retried.
    fn retry<T>(&mut self, mut attempt: impl FnMut(&mut Self) -> Result<DspResult<T>>) -> Result<T> {
        loop {
            match attempt(self)? {
                Ok(value) => return Ok(value),
                Err(DspError::InvalidUserInput(reason)) => {
                    log::warn!("Rejected input: {}", reason);
                    writeln!(self.output, "Error: {}. Try again.", reason)?;
                }
                Err(other) => return Err(other.into()),
            }
        }
    }

    /// Ask for a position in the signal, in minutes (only for signals longer
    /// than a minute) and seconds. Returns seconds.
    pub fn timestamp(&mut self, duration: f64, stamp: &str) -> Result<f64> {
        writeln!(self.output, "Audio length: {}", format_timestamp(duration))?;
        writeln!(self.output, "Enter {} time.", stamp)?;
        self.retry(|p| {
            let mins = if duration > 60.0 {
                Some(p.read_line("Minutes:")?)
            } else {
                None
            };
            let secs = p.read_line("Seconds:")?;
            Ok(parse_timestamp(mins.as_deref(), &secs, duration))
        })
    }

    pub fn frame_length_ms(&mut self) -> Result<u32> {
        self.retry(|p| Ok(parse_positive(&p.read_line("Enter frame size in ms.")?)))
    }

    pub fn fade_length_ms(&mut self) -> Result<u32> {
        self.retry(|p| Ok(parse_positive(&p.read_line("Enter fade time in ms:")?)))
    }

    pub fn step(&mut self) -> Result<f64> {
        self.retry(|p| Ok(parse_number(&p.read_line("Enter step size.")?)))
    }

    /// Show a numbered menu and return the 0-based index of the choice.
    pub fn choose(&mut self, label: &str, options: &[&str]) -> Result<usize> {
        let mut menu = label.to_string();
        for (i, option) in options.iter().enumerate() {
            menu.push_str(&format!("\n[{}] {}", i + 1, option));
        }
        self.retry(|p| Ok(parse_choice(&p.read_line(&menu)?, options.len())))
    }
}

fn invalid(reason: &str) -> DspError {
    DspError::InvalidUserInput(reason.to_string())
}

fn parse_number(text: &str) -> DspResult<f64> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid("Not a number")),
    }
}

fn parse_positive(text: &str) -> DspResult<u32> {
    match text.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(invalid("Expected a positive whole number")),
    }
}

fn parse_choice(text: &str, count: usize) -> DspResult<usize> {
    match text.parse::<usize>() {
        Ok(v) if (1..=count).contains(&v) => Ok(v - 1),
        _ => Err(invalid("Unknown option")),
    }
}

/// Validate a minutes/seconds entry against the signal duration.
pub fn parse_timestamp(mins: Option<&str>, secs: &str, duration: f64) -> DspResult<f64> {
    let mins = match mins {
        Some(m) => parse_number(m)?,
        None => 0.0,
    };
    let secs = parse_number(secs)?;
    if !(0.0..60.0).contains(&secs) || mins < 0.0 {
        return Err(invalid("Incorrect time value"));
    }
    let total = mins * 60.0 + secs;
    if total > duration {
        return Err(invalid("Time value out of bounds"));
    }
    Ok(total)
}

/// `MM:SS.mmm`, with a leading hour field for durations of an hour or more.
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0) as u64;
    let hours = total_ms / 3_600_000;
    let mins = (total_ms / 60_000) % 60;
    let secs = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;
    if hours > 0 {
        format!("{}:{:02}:{:02}.{:03}", hours, mins, secs, millis)
    } else {
        format!("{:02}:{:02}.{:03}", mins, secs, millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output).unwrap()
    }

    #[test]
    fn formats_readable_time() {
        assert_eq!(format_timestamp(75.5), "01:15.500");
        assert_eq!(format_timestamp(3.0), "00:03.000");
        assert_eq!(format_timestamp(3725.25), "1:02:05.250");
    }

    #[test]
    fn timestamp_validation() {
        assert_eq!(parse_timestamp(None, "12.5", 30.0), Ok(12.5));
        assert_eq!(parse_timestamp(Some("1"), "30", 120.0), Ok(90.0));
        assert_eq!(
            parse_timestamp(None, "60", 120.0),
            Err(invalid("Incorrect time value"))
        );
        assert_eq!(
            parse_timestamp(None, "-1", 120.0),
            Err(invalid("Incorrect time value"))
        );
        assert_eq!(
            parse_timestamp(Some("2"), "1", 120.0),
            Err(invalid("Time value out of bounds"))
        );
        assert_eq!(parse_timestamp(None, "abc", 30.0), Err(invalid("Not a number")));
    }

    #[test]
    fn short_signals_skip_the_minutes_question() {
        let mut p = prompter("4.25\n");
        assert_eq!(p.timestamp(10.0, "start").unwrap(), 4.25);
        let out = transcript(p);
        assert!(out.contains("Audio length: 00:10.000"));
        assert!(out.contains("Enter start time."));
        assert!(!out.contains("Minutes:"));
    }

    #[test]
    fn bad_timestamp_is_asked_again() {
        let mut p = prompter("3\n5\n1\n15\n");
        assert_eq!(p.timestamp(100.0, "end").unwrap(), 75.0);
        let out = transcript(p);
        assert!(out.contains("Error: Time value out of bounds. Try again."));
        assert_eq!(out.matches("Minutes:").count(), 2);
    }

    #[test]
    fn frame_length_must_be_positive() {
        let mut p = prompter("0\nabc\n20\n");
        assert_eq!(p.frame_length_ms().unwrap(), 20);
        assert_eq!(transcript(p).matches("Try again.").count(), 2);
    }

    #[test]
    fn choose_returns_zero_based_index() {
        let mut p = prompter("4\n2\n");
        let picked = p.choose("Choose fade type:", &["Linear", "Logarithmic"]).unwrap();
        assert_eq!(picked, 1);
        let out = transcript(p);
        assert!(out.contains("[2] Logarithmic"));
        assert!(out.contains("Error: Unknown option. Try again."));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut p = prompter("");
        assert!(p.step().is_err());
    }
}
