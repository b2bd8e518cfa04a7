//! Composite item that lists its children and dispatches to the chosen one.
//!
//! A menu renders its title once, then loops: list items, read a valid item
//! number, run that item. The loop ends when the item that just ran reports
//! [`Item::is_exit`]. Recoverable item failures are printed and the loop goes
//! on; fatal ones are returned to whoever called [`Item::perform`].

use anyhow::{Result, anyhow, bail};
use tracing::{debug, info, instrument, warn};

use crate::io::config::MenuStyle;
use crate::io::read::InputOutputExt;
use crate::io::terminal::InputOutput;
use crate::item::{ActionError, ActionResult, Item};

pub struct Menu {
    title: String,
    items: Vec<Box<dyn Item>>,
    style: MenuStyle,
}

impl Menu {
    /// Build a menu over `items`, numbered from 1 in the given order.
    ///
    /// Fails if `items` is empty.
    pub fn new(title: impl Into<String>, items: Vec<Box<dyn Item>>) -> Result<Self> {
        let title = title.into();
        if items.is_empty() {
            bail!("menu '{title}' needs at least one item");
        }
        Ok(Self {
            title,
            items,
            style: MenuStyle::default(),
        })
    }

    pub fn with_style(mut self, style: MenuStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &MenuStyle {
        &self.style
    }

    fn display_title(&self, io: &mut dyn InputOutput) -> Result<()> {
        let border = self.style.border();
        io.write_line(&border)?;
        io.write_line(&self.title)?;
        io.write_line(border)
    }

    fn display_items(&self, io: &mut dyn InputOutput) -> Result<()> {
        for (idx, item) in self.items.iter().enumerate() {
            io.write_line(format!("{}. {}", idx + 1, item.display_name()))?;
        }
        Ok(())
    }

    /// Read an item number in `[1, len]`; fractional input is truncated.
    fn select(&self, io: &mut dyn InputOutput) -> Result<&dyn Item> {
        let number = io.read_number_range(
            &self.style.select_prompt,
            &self.style.error_prompt,
            1.0,
            self.items.len() as f64,
        )?;
        let index = number.trunc() as usize;
        self.items
            .get(index - 1)
            .map(|item| item.as_ref())
            .ok_or_else(|| anyhow!("item number {index} outside menu '{}'", self.title))
    }
}

impl Item for Menu {
    fn display_name(&self) -> &str {
        &self.title
    }

    #[instrument(skip_all, fields(title = %self.title, items = self.items.len()))]
    fn perform(&self, io: &mut dyn InputOutput) -> ActionResult {
        self.style.validate()?;
        self.display_title(io)?;
        loop {
            self.display_items(io)?;
            let item = self.select(io)?;
            debug!(item = item.display_name(), "dispatching");
            match item.perform(io) {
                Ok(()) if item.is_exit() => {
                    debug!(item = item.display_name(), "exit item selected");
                    return Ok(());
                }
                Ok(()) => {}
                Err(ActionError::Recoverable(message)) => {
                    info!(item = item.display_name(), %message, "item failed, continuing");
                    io.write_line(message)?;
                }
                Err(err) => {
                    warn!(item = item.display_name(), error = %err, "item failed fatally");
                    return Err(err);
                }
            }
        }
    }

    fn is_exit(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ExitItem;
    use crate::test_support::{CallLog, RecordingItem, ScriptedIo};

    fn add_list_exit(log: &CallLog) -> Menu {
        Menu::new(
            "Contacts",
            vec![
                Box::new(RecordingItem::new("Add", log)),
                Box::new(RecordingItem::new("List", log)),
                Box::new(RecordingItem::new("Exit", log).exiting()),
            ],
        )
        .expect("menu")
    }

    const TITLE: [&str; 3] = ["_______________", "Contacts", "_______________"];
    const ITEMS: [&str; 3] = ["1. Add", "2. List", "3. Exit"];

    #[test]
    fn new_rejects_empty_menu() {
        let err = Menu::new("Empty", Vec::new()).err().expect("error");
        assert!(err.to_string().contains("at least one item"));
    }

    #[test]
    fn selecting_exit_renders_and_returns() {
        let log = CallLog::default();
        let menu = add_list_exit(&log);
        let mut io = ScriptedIo::new(["3"]);

        menu.perform(&mut io).expect("perform");

        let expected: Vec<&str> = TITLE.iter().chain(ITEMS.iter()).copied().collect();
        assert_eq!(io.lines(), expected);
        assert_eq!(log.calls(), vec!["Exit"]);
        assert_eq!(io.prompts(), ["Select item"]);
    }

    #[test]
    fn out_of_range_selection_is_retried_then_dispatched() {
        let log = CallLog::default();
        let menu = add_list_exit(&log);
        let mut io = ScriptedIo::new(["5", "1", "3"]);

        menu.perform(&mut io).expect("perform");

        let mut expected: Vec<&str> = TITLE.to_vec();
        expected.extend(ITEMS);
        expected.push("Wrong item number: Number is out of bounds");
        expected.extend(ITEMS);
        assert_eq!(io.lines(), expected);
        assert_eq!(log.calls(), vec!["Add", "Exit"]);
    }

    #[test]
    fn boundaries_reject_zero_and_len_plus_one() {
        let log = CallLog::default();
        let menu = add_list_exit(&log);
        let mut io = ScriptedIo::new(["0", "4", "1", "2", "3"]);

        menu.perform(&mut io).expect("perform");

        let errors = io
            .lines()
            .into_iter()
            .filter(|line| line.starts_with("Wrong item number: "))
            .count();
        assert_eq!(errors, 2);
        assert_eq!(log.calls(), vec!["Add", "List", "Exit"]);
    }

    #[test]
    fn fractional_selection_is_truncated() {
        let log = CallLog::default();
        let menu = add_list_exit(&log);
        let mut io = ScriptedIo::new(["2.9", "3"]);

        menu.perform(&mut io).expect("perform");

        assert_eq!(log.calls(), vec!["List", "Exit"]);
    }

    #[test]
    fn recoverable_failure_is_printed_without_title() {
        let log = CallLog::default();
        let menu = Menu::new(
            "Contacts",
            vec![
                Box::new(RecordingItem::new("Add", &log).failing_recoverably("bad state")),
                Box::new(ExitItem::default()),
            ],
        )
        .expect("menu");
        let mut io = ScriptedIo::new(["1", "2"]);

        menu.perform(&mut io).expect("perform");

        assert_eq!(
            io.lines(),
            vec![
                "_______________",
                "Contacts",
                "_______________",
                "1. Add",
                "2. Exit",
                "bad state",
                "1. Add",
                "2. Exit",
            ]
        );
        assert_eq!(log.calls(), vec!["Add"]);
    }

    #[test]
    fn recoverable_failure_on_exit_item_does_not_exit() {
        let log = CallLog::default();
        let menu = Menu::new(
            "M",
            vec![
                Box::new(
                    RecordingItem::new("Quit", &log)
                        .exiting()
                        .failing_recoverably("unsaved changes"),
                ),
                Box::new(ExitItem::new("Force quit")),
            ],
        )
        .expect("menu");
        let mut io = ScriptedIo::new(["1", "2"]);

        menu.perform(&mut io).expect("perform");

        assert!(io.lines().contains(&"unsaved changes".to_string()));
        assert_eq!(log.calls(), vec!["Quit"]);
    }

    #[test]
    fn fatal_failure_propagates() {
        let log = CallLog::default();
        let menu = Menu::new(
            "M",
            vec![
                Box::new(RecordingItem::new("Boom", &log).failing_fatally("corrupted")),
                Box::new(ExitItem::default()),
            ],
        )
        .expect("menu");
        let mut io = ScriptedIo::new(["1", "2"]);

        let err = menu.perform(&mut io).unwrap_err();

        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "corrupted");
        assert_eq!(io.remaining(), 1);
    }

    #[test]
    fn end_of_input_is_fatal() {
        let log = CallLog::default();
        let menu = add_list_exit(&log);
        let mut io = ScriptedIo::new(["1"]);

        let err = menu.perform(&mut io).unwrap_err();

        assert!(matches!(err, ActionError::Fatal(_)));
        assert_eq!(log.calls(), vec!["Add"]);
    }

    #[test]
    fn sub_menu_returns_control_to_parent() {
        let log = CallLog::default();
        let sub = Menu::new(
            "Tools",
            vec![
                Box::new(RecordingItem::new("Count", &log)),
                Box::new(ExitItem::new("Back")),
            ],
        )
        .expect("sub menu");
        let main = Menu::new(
            "Main",
            vec![Box::new(sub), Box::new(RecordingItem::new("Quit", &log).exiting())],
        )
        .expect("main menu");
        let mut io = ScriptedIo::new(["1", "1", "2", "2"]);

        main.perform(&mut io).expect("perform");

        assert_eq!(log.calls(), vec!["Count", "Quit"]);
        let lines = io.lines();
        assert_eq!(lines.iter().filter(|line| *line == "Main").count(), 1);
        assert_eq!(lines.iter().filter(|line| *line == "Tools").count(), 1);
        assert_eq!(lines.iter().filter(|line| *line == "1. Tools").count(), 2);
    }

    #[test]
    fn recoverable_failure_in_sub_menu_is_handled_there() {
        let log = CallLog::default();
        let sub = Menu::new(
            "Tools",
            vec![
                Box::new(RecordingItem::new("Broken", &log).failing_recoverably("try again")),
                Box::new(ExitItem::new("Back")),
            ],
        )
        .expect("sub menu");
        let main = Menu::new("Main", vec![Box::new(sub), Box::new(ExitItem::default())])
            .expect("main menu");
        let mut io = ScriptedIo::new(["1", "1", "2", "2"]);

        main.perform(&mut io).expect("perform");

        assert_eq!(log.calls(), vec!["Broken"]);
        assert!(io.lines().contains(&"try again".to_string()));
    }

    #[test]
    fn invalid_style_fails_before_rendering() {
        let style = MenuStyle {
            n_symbols: usize::MAX,
            ..MenuStyle::default()
        };
        let menu = Menu::new("M", vec![Box::new(ExitItem::default())])
            .expect("menu")
            .with_style(style);
        let mut io = ScriptedIo::new(["1"]);

        let err = menu.perform(&mut io).unwrap_err();

        assert!(matches!(err, ActionError::Fatal(_)));
        assert!(io.output().is_empty());
        assert_eq!(io.remaining(), 1);
    }

    #[test]
    fn menu_is_never_exit() {
        let menu = Menu::new("M", vec![Box::new(ExitItem::default())]).expect("menu");
        assert!(!menu.is_exit());
        assert_eq!(menu.display_name(), "M");
    }

    #[test]
    fn style_changes_border_and_prompts() {
        let style = MenuStyle {
            symbol: "*".to_string(),
            n_symbols: 4,
            select_prompt: "Choose".to_string(),
            error_prompt: "No such entry".to_string(),
        };
        let menu = Menu::new("M", vec![Box::new(ExitItem::default())])
            .expect("menu")
            .with_style(style.clone());
        assert_eq!(menu.style(), &style);
        let mut io = ScriptedIo::new(["x", "1"]);

        menu.perform(&mut io).expect("perform");

        let lines = io.lines();
        assert_eq!(lines[0], "****");
        assert_eq!(lines[2], "****");
        assert!(lines.iter().any(|line| line.starts_with("No such entry: ")));
        assert_eq!(io.prompts(), ["Choose", "Choose"]);
    }
}
