// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Text drum kit.
//!
//! Prints each step as the names of its drums joined by `+`, or `__` for a
//! rest, and ends the line after the last step of every pass:
//!
//! ```text
//! HH+BD__HH__HH+SD__HH__
//! ```

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

use tracing::warn;

use crate::sequencer::{DrumKit, Step};

/// Drums known to the text kit
pub const TEXT_DRUMS: &[&str] = &[
    "CY", // cymbal
    "HH", // hi-hat
    "TA", // tambourine
    "CW", // cowbell
    "HT", // high tom
    "MT", // mid tom
    "LT", // low tom
    "SD", // snare drum
    "BD", // bass drum
    "AC", // accent
];

/// Printed for a step with no drums
const REST: &str = "__";

/// Kit that prints steps to a writer
pub struct TextKit<W: Write> {
    out: Rc<RefCell<W>>,
}

impl TextKit<io::Stdout> {
    /// Text kit printing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextKit<W> {
    /// Text kit printing to `writer`
    pub fn new(writer: W) -> Self {
        Self {
            out: Rc::new(RefCell::new(writer)),
        }
    }

    /// The writer shared by every step of this kit
    pub fn output(&self) -> Rc<RefCell<W>> {
        Rc::clone(&self.out)
    }
}

impl<W: Write + 'static> DrumKit for TextKit<W> {
    fn has_drum(&self, name: &str) -> bool {
        TEXT_DRUMS.contains(&name)
    }

    fn new_step(&self) -> Box<dyn Step> {
        Box::new(TextStep {
            val: String::new(),
            out: Rc::clone(&self.out),
        })
    }

    /// End the partly printed line
    fn pass_interrupted(&self) {
        let mut out = self.out.borrow_mut();
        let result = out.write_all(b"\n").and_then(|()| out.flush());
        if let Err(e) = result {
            warn!("failed to end line: {}", e);
        }
    }
}

/// A step of the text kit
pub struct TextStep<W: Write> {
    val: String,
    out: Rc<RefCell<W>>,
}

impl<W: Write> TextStep<W> {
    fn write_to(&self, out: &mut W, last_step: bool) -> io::Result<()> {
        if self.val.is_empty() {
            out.write_all(REST.as_bytes())?;
        } else {
            out.write_all(self.val.as_bytes())?;
        }
        if last_step {
            out.write_all(b"\n")?;
        }
        out.flush()
    }
}

impl<W: Write> Step for TextStep<W> {
    fn add_drum(&mut self, name: &str) {
        if !self.val.is_empty() {
            self.val.push('+');
        }
        self.val.push_str(name);
    }

    fn play(&mut self, last_step: bool) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = self.write_to(&mut out, last_step) {
            warn!("failed to print step: {}", e);
        }
    }
}

impl<W: Write> fmt::Debug for TextStep<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.val.is_empty() { REST } else { &self.val })
    }
}
