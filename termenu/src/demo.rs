//! Sample menu tree used by `termenu run`: a small in-memory contact book
//! plus a tools sub-menu exercising every typed reader.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::LazyLock;

use anyhow::Result;
use chrono::NaiveDate;
use termenu::io::config::MenuStyle;
use termenu::io::read::InputOutputExt;
use termenu::io::terminal::InputOutput;
use termenu::item::{ActionError, ActionItem, ActionResult, ExitItem, Item};
use termenu::menu::Menu;
use tracing::debug;

static PHONE_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\+?[0-9]{7,15}$").unwrap());

const GROUPS: [&str; 3] = ["family", "friends", "work"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub group: String,
}

/// In-memory contact storage shared by the contact actions.
#[derive(Debug, Default)]
pub struct ContactBook {
    contacts: RefCell<Vec<Contact>>,
}

impl ContactBook {
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.borrow().clone()
    }

    fn names(&self) -> HashSet<String> {
        self.contacts
            .borrow()
            .iter()
            .map(|contact| contact.name.clone())
            .collect()
    }
}

/// Build the demo tree. `today` bounds the accepted birth dates.
pub fn build_menu(book: Rc<ContactBook>, style: &MenuStyle, today: NaiveDate) -> Result<Menu> {
    let items: Vec<Box<dyn Item>> = vec![
        Box::new(add_contact(book.clone(), today)),
        Box::new(list_contacts(book.clone())),
        Box::new(remove_contact(book)),
        Box::new(tools_menu(style)?),
        Box::new(ExitItem::default()),
    ];
    Ok(Menu::new("Contact book", items)?.with_style(style.clone()))
}

fn add_contact(book: Rc<ContactBook>, today: NaiveDate) -> ActionItem {
    ActionItem::new("Add contact", move |io| {
        let name = io.read_string_predicate("Name", "Invalid name", |s| !s.trim().is_empty())?;
        if book.names().contains(&name) {
            return Err(ActionError::recoverable(format!(
                "Contact {name} already exists"
            )));
        }
        let phone = io.read_string_predicate("Phone", "Invalid phone", |s| PHONE_RE.is_match(s))?;
        let earliest = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN);
        let birth_date =
            io.read_iso_date_range("Birth date (YYYY-MM-DD)", "Invalid date", earliest, today)?;
        let groups: HashSet<String> = GROUPS.iter().map(|g| g.to_string()).collect();
        let group = io.read_string_options(
            &format!("Group ({})", GROUPS.join("/")),
            "Invalid group",
            &groups,
        )?;
        debug!(%name, %group, "contact added");
        book.contacts.borrow_mut().push(Contact {
            name: name.clone(),
            phone,
            birth_date,
            group,
        });
        io.write_line(format!("Added {name}"))?;
        Ok(())
    })
}

fn list_contacts(book: Rc<ContactBook>) -> ActionItem {
    ActionItem::new("List contacts", move |io| {
        let contacts = book.contacts();
        if contacts.is_empty() {
            return Err(ActionError::recoverable("No contacts yet"));
        }
        for contact in contacts {
            io.write_line(format!(
                "{} {} {} [{}]",
                contact.name, contact.phone, contact.birth_date, contact.group
            ))?;
        }
        Ok(())
    })
}

fn remove_contact(book: Rc<ContactBook>) -> ActionItem {
    ActionItem::new("Remove contact", move |io| {
        let names = book.names();
        if names.is_empty() {
            return Err(ActionError::recoverable("No contacts yet"));
        }
        let name = io.read_string_options("Name to remove", "Unknown contact", &names)?;
        book.contacts
            .borrow_mut()
            .retain(|contact| contact.name != name);
        io.write_line(format!("Removed {name}"))?;
        Ok(())
    })
}

fn tools_menu(style: &MenuStyle) -> Result<Menu> {
    let items: Vec<Box<dyn Item>> = vec![
        Box::new(ActionItem::new("Add two integers", add_integers)),
        Box::new(ActionItem::new("Square root", square_root)),
        Box::new(ActionItem::new("Multiply small numbers", multiply_small)),
        Box::new(ActionItem::new("Days between dates", days_between)),
        Box::new(ExitItem::new("Back")),
    ];
    Ok(Menu::new("Tools", items)?.with_style(style.clone()))
}

fn add_integers(io: &mut dyn InputOutput) -> ActionResult {
    let a = io.read_long("First integer", "Not an integer")?;
    let b = io.read_long("Second integer", "Not an integer")?;
    let sum = a
        .checked_add(b)
        .ok_or_else(|| ActionError::recoverable("Sum does not fit into 64 bits"))?;
    io.write_line(sum)?;
    Ok(())
}

fn square_root(io: &mut dyn InputOutput) -> ActionResult {
    let value = io.read_double("Number", "Not a number")?;
    if value < 0.0 {
        return Err(ActionError::recoverable(
            "Cannot take the square root of a negative number",
        ));
    }
    io.write_line(value.sqrt())?;
    Ok(())
}

fn multiply_small(io: &mut dyn InputOutput) -> ActionResult {
    let a = io.read_int("First factor", "Not an integer")?;
    let b = io.read_number_range("Second factor (0-10)", "Invalid factor", 0.0, 10.0)?;
    io.write_line(f64::from(a) * b)?;
    Ok(())
}

fn days_between(io: &mut dyn InputOutput) -> ActionResult {
    let from = io.read_iso_date("From (YYYY-MM-DD)", "Invalid date")?;
    let to = io.read_iso_date("To (YYYY-MM-DD)", "Invalid date")?;
    io.write_line((to - from).num_days())?;
    Ok(())
}
