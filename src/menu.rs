use crate::console::Console;
use crate::core::db::{self, NewStudent};
use crate::core::{Result, StudentDbError};
use rusqlite::Connection;
use std::io::{BufRead, Write};
use tracing::debug;

/// The menu shown before every selection.
pub const MENU: &str = "\
Menu:
1. getAllStudents()
2. addStudent()
3. updateStudentEmail()
4. deleteStudent()
0. Exit";

/// Represents a parsed menu selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuChoice {
    ListStudents,
    AddStudent,
    UpdateStudentEmail,
    DeleteStudent,
    Exit,
}

impl MenuChoice {
    /// Parses a selection typed at the menu prompt.
    ///
    /// Returns `None` for anything that is not one of the listed options.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::ListStudents),
            "2" => Some(MenuChoice::AddStudent),
            "3" => Some(MenuChoice::UpdateStudentEmail),
            "4" => Some(MenuChoice::DeleteStudent),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// What a handler did, so callers can tell outcomes apart without reading
/// the console.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Rows printed by the listing
    Listed(usize),
    /// Identifier of the inserted student
    Added(i64),
    /// Rows whose email changed
    Updated(usize),
    /// Rows removed
    Deleted(usize),
    /// Input failed validation; the database was not touched
    Rejected,
    /// The statement failed and was rolled back
    Failed,
}

/// Prints every student row.
pub fn handle_list_students<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    conn: &Connection,
) -> Result<Outcome> {
    console.clear_screen()?;
    console.println("getAllStudents() selected.")?;

    match db::list_students(conn, console.writer()) {
        Ok(0) => {
            console.println("No students found.")?;
            Ok(Outcome::Listed(0))
        }
        Ok(count) => Ok(Outcome::Listed(count)),
        Err(e) => report_failure(console, "listing the students", e),
    }
}

/// Prompts for the four student fields and inserts the student.
pub fn handle_add_student<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    conn: &Connection,
) -> Result<Outcome> {
    console.clear_screen()?;
    console.println("addStudent() selected.")?;

    let student = NewStudent {
        first_name: console.prompt("Enter first name: ")?,
        last_name: console.prompt("Enter last name: ")?,
        email: console.prompt("Enter email: ")?,
        enrollment_date: console.prompt("Enter enrollment date (YYYY-MM-DD): ")?,
    };

    let missing = student.missing_fields();
    if !missing.is_empty() {
        debug!(?missing, "add rejected");
        console.println("All fields are required. Student not added.")?;
        return Ok(Outcome::Rejected);
    }

    match db::add_student(conn, &student) {
        Ok(id) => {
            console.println("Student added successfully.")?;
            Ok(Outcome::Added(id))
        }
        Err(e) => report_failure(console, "adding the student", e),
    }
}

/// Prompts for an identifier and a new email, then updates that student.
pub fn handle_update_student_email<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    conn: &Connection,
) -> Result<Outcome> {
    console.clear_screen()?;
    console.println("updateStudentEmail() selected.")?;

    let Some(student_id) = read_student_id(console, "Enter student ID to update: ")? else {
        return Ok(Outcome::Rejected);
    };
    let new_email = console.prompt("Enter new email: ")?;

    if new_email.is_empty() {
        console.println("Email cannot be empty. Update not performed.")?;
        return Ok(Outcome::Rejected);
    }

    match db::update_student_email(conn, student_id, &new_email) {
        Ok(0) => {
            report_unknown_id(console, student_id)?;
            Ok(Outcome::Updated(0))
        }
        Ok(changed) => {
            console.println("Student email updated successfully.")?;
            Ok(Outcome::Updated(changed))
        }
        Err(e) => report_failure(console, "updating the student email", e),
    }
}

/// Prompts for an identifier and deletes that student.
pub fn handle_delete_student<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    conn: &Connection,
) -> Result<Outcome> {
    console.clear_screen()?;
    console.println("deleteStudent() selected.")?;

    let Some(student_id) = read_student_id(console, "Enter student ID to delete: ")? else {
        return Ok(Outcome::Rejected);
    };

    match db::delete_student(conn, student_id) {
        Ok(0) => {
            report_unknown_id(console, student_id)?;
            Ok(Outcome::Deleted(0))
        }
        Ok(removed) => {
            console.println("Student deleted successfully.")?;
            Ok(Outcome::Deleted(removed))
        }
        Err(e) => report_failure(console, "deleting the student", e),
    }
}

/// Parses a student identifier typed at a prompt.
pub fn parse_student_id(input: &str) -> Result<i64> {
    input
        .trim()
        .parse()
        .map_err(|_| StudentDbError::InvalidStudentId(input.to_string()))
}

/// Reads an identifier; a malformed one cancels the operation.
fn read_student_id<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    message: &str,
) -> Result<Option<i64>> {
    let input = console.prompt(message)?;
    match parse_student_id(&input) {
        Ok(id) => Ok(Some(id)),
        Err(e @ StudentDbError::InvalidStudentId(_)) => {
            console.println(format!("{}. Operation cancelled.", e))?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn report_unknown_id<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    student_id: i64,
) -> Result<()> {
    console.println(format!("No student found with ID {}.", student_id))
}

/// Prints a failed statement and keeps the session alive; console errors
/// still propagate.
fn report_failure<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    action: &str,
    err: StudentDbError,
) -> Result<Outcome> {
    match err {
        StudentDbError::Query { .. } => {
            console.println(format!("An error occurred while {}: {}", action, err))?;
            Ok(Outcome::Failed)
        }
        other => Err(other),
    }
}

/// Runs the handler for `choice`. `Exit` does nothing.
pub fn dispatch<R: BufRead, W: Write>(
    choice: MenuChoice,
    console: &mut Console<R, W>,
    conn: &Connection,
) -> Result<Option<Outcome>> {
    let outcome = match choice {
        MenuChoice::ListStudents => handle_list_students(console, conn)?,
        MenuChoice::AddStudent => handle_add_student(console, conn)?,
        MenuChoice::UpdateStudentEmail => handle_update_student_email(console, conn)?,
        MenuChoice::DeleteStudent => handle_delete_student(console, conn)?,
        MenuChoice::Exit => return Ok(None),
    };
    debug!(?choice, ?outcome, "menu option handled");
    Ok(Some(outcome))
}

/// Shows the menu and handles selections until the user exits or the input
/// ends.
pub fn run_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    conn: &Connection,
) -> Result<()> {
    match menu_loop(console, conn) {
        Err(StudentDbError::InputClosed) => {
            debug!("input closed, leaving the menu");
            Ok(())
        }
        other => other,
    }
}

fn menu_loop<R: BufRead, W: Write>(console: &mut Console<R, W>, conn: &Connection) -> Result<()> {
    loop {
        console.clear_screen()?;
        console.println(MENU)?;

        let selection = console.prompt("Select an option: ")?;
        match MenuChoice::parse(&selection) {
            Some(MenuChoice::Exit) => {
                console.println("Exiting the program.")?;
                return Ok(());
            }
            Some(choice) => {
                dispatch(choice, console, conn)?;
            }
            None => {
                console.println("Invalid option. Please try again.")?;
            }
        }
        console.pause()?;
    }
}
