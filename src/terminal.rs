//! Line-oriented terminal front-end.
//!
//! [`TerminalRenderer`] prints each render as plain text and parks the latest
//! Props in [`Controls`]; typed [`Command`]s are dispatched to the callbacks
//! held there, exactly like clicks on a graphical form would be.

use std::io::{self, Write};
use std::sync::Arc;

use spin::Mutex;
use tracing::warn;

use crate::app::AppProps;
use crate::error::CommandError;
use crate::form::{FormProps, IngredientSlotProps};
use crate::result_view::{RecipeView, SectionBody, SectionView};
use crate::Renderer;

pub const HELP: &str = "\
commands:
  add                 add an ingredient slot
  remove <n>          remove ingredient slot n
  set <n> <text>      fill ingredient slot n
  diet <label|none>   choose a diet
  submit              generate a recipe
  help                show this list
  quit                leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    /// 1-based slot number.
    Remove(usize),
    /// 1-based slot number.
    Set { slot: usize, text: String },
    Diet(Option<String>),
    Submit,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "add" => Ok(Command::Add),
            "remove" | "rm" => parse_slot(rest, "remove", "a slot number").map(Command::Remove),
            "set" => {
                let (slot, text) = match rest.split_once(char::is_whitespace) {
                    Some((slot, text)) => (slot, text.trim()),
                    None => (rest, ""),
                };
                let slot = parse_slot(slot, "set", "a slot number and text")?;
                Ok(Command::Set {
                    slot,
                    text: text.to_string(),
                })
            }
            "diet" => match rest {
                "" => Err(CommandError::Usage {
                    command: "diet",
                    expected: "a diet label or `none`",
                }),
                none if none.eq_ignore_ascii_case("none") => Ok(Command::Diet(None)),
                label => Ok(Command::Diet(Some(label.to_string()))),
            },
            "submit" | "create" => Ok(Command::Submit),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_slot(
    raw: &str,
    command: &'static str,
    expected: &'static str,
) -> Result<usize, CommandError> {
    raw.parse::<usize>()
        .ok()
        .filter(|slot| *slot > 0)
        .ok_or(CommandError::Usage { command, expected })
}

/// The most recently rendered Props, shared between renderer and input loop.
#[derive(Clone, Default)]
pub struct Controls {
    latest: Arc<Mutex<Option<AppProps>>>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    fn replace(&self, props: AppProps) {
        *self.latest.lock() = Some(props);
    }

    /// Invoke the callback a command stands for.
    ///
    /// `help` and `quit` are handled by the caller and do nothing here.
    pub fn dispatch(&self, command: &Command) -> Result<(), CommandError> {
        let latest = self.latest.lock();
        let props = latest.as_ref().ok_or(CommandError::NotReady)?;
        let form = &props.form;

        match command {
            Command::Add => {
                let on_add = form.on_add.as_ref().ok_or(CommandError::SlotsFull)?;
                on_add();
            }
            Command::Remove(slot) => {
                let target = slot_at(form, *slot)?;
                (target.on_remove)();
            }
            Command::Set { slot, text } => {
                let target = slot_at(form, *slot)?;
                (target.on_change)(text.clone());
            }
            Command::Diet(label) => {
                let choice = form
                    .diet_choices
                    .iter()
                    .find(|choice| match (label, &choice.value) {
                        (None, None) => true,
                        (Some(wanted), Some(value)) => value.eq_ignore_ascii_case(wanted),
                        _ => false,
                    })
                    .ok_or_else(|| CommandError::UnknownDiet(label.clone().unwrap_or_default()))?;
                (choice.on_select)();
            }
            Command::Submit => {
                let on_submit = form
                    .submit
                    .on_submit
                    .as_ref()
                    .ok_or(CommandError::SubmitDisabled)?;
                on_submit();
            }
            Command::Help | Command::Quit => {}
        }

        Ok(())
    }
}

fn slot_at(form: &FormProps, slot: usize) -> Result<&IngredientSlotProps, CommandError> {
    slot.checked_sub(1)
        .and_then(|index| form.slots.get(index))
        .ok_or(CommandError::NoSuchSlot(slot))
}

/// Prints every render to `out`.
pub struct TerminalRenderer<W: Write> {
    out: W,
    controls: Controls,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, controls: Controls) -> Self {
        Self { out, controls }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Renderer<AppProps> for TerminalRenderer<W> {
    fn render(&mut self, props: AppProps) {
        if let Err(err) = write_screen(&mut self.out, &props).and_then(|()| self.out.flush()) {
            warn!(error = %err, "failed to draw screen");
        }
        self.controls.replace(props);
    }
}

/// Write one screen for `props`.
pub fn write_screen<W: Write>(out: &mut W, props: &AppProps) -> io::Result<()> {
    writeln!(out, "== {} ==", props.headline)?;
    writeln!(out, "{}", props.tagline)?;
    writeln!(out)?;

    let form = &props.form;
    write!(out, "{}", form.diet_heading)?;
    for choice in &form.diet_choices {
        let mark = if choice.selected { 'x' } else { ' ' };
        write!(out, "  [{mark}] {}", choice.text)?;
    }
    writeln!(out)?;

    writeln!(out, "{}", form.ingredients_heading)?;
    for (index, slot) in form.slots.iter().enumerate() {
        if slot.value.is_empty() {
            writeln!(out, "  {}. ({})", index + 1, slot.placeholder)?;
        } else {
            writeln!(out, "  {}. {}", index + 1, slot.value)?;
        }
    }
    if form.on_add.is_some() {
        writeln!(out, "  + add more ingredient")?;
    }

    let state = if form.submit.enabled { "" } else { " (disabled)" };
    writeln!(out, "[{}]{state}", form.submit.text)?;

    if let Some(panel) = &props.errors {
        writeln!(out)?;
        writeln!(out, "{}", panel.heading)?;
        for message in &panel.messages {
            writeln!(out, "  - {message}")?;
        }
    }

    if let Some(recipe) = &props.recipe {
        writeln!(out)?;
        write_recipe(out, recipe)?;
    }

    writeln!(out)
}

fn write_recipe<W: Write>(out: &mut W, recipe: &RecipeView) -> io::Result<()> {
    writeln!(out, "{}", recipe.title)?;
    writeln!(out, "{}", recipe.description)?;
    write_section(out, &recipe.ingredients)?;
    write_section(out, &recipe.steps)
}

fn write_section<W: Write>(out: &mut W, section: &SectionView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", section.heading)?;
    match &section.body {
        SectionBody::Items(lines) => {
            for line in lines {
                writeln!(out, "  {line}")?;
            }
        }
        SectionBody::Notice(notice) => writeln!(out, "  {notice}")?,
    }
    Ok(())
}
