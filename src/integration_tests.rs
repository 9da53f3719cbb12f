/// # Integration Tests Module
///
/// End-to-end sessions over the menu, the handlers and the database layer,
/// each driven by a scripted console against an isolated database.

#[cfg(test)]
mod tests {
    use crate::menu::run_menu;
    use crate::test_utils::{scripted_console, DatabaseFixture};

    /// Add, update, delete and list in one session
    #[test]
    fn test_full_crud_session() {
        let fixture = DatabaseFixture::with_sample_data().unwrap();
        let script = "\
2\nGrace\nHopper\ngrace@example.com\n2024-02-01\n\n\
3\n4\ngrace.hopper@example.com\n\n\
4\n2\n\n\
1\n\n\
0\n";
        let mut console = scripted_console(script);

        run_menu(&mut console, &fixture.connection).unwrap();

        let rows = fixture.all_rows();
        let ids: Vec<i64> = rows.iter().map(|row| row.0).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(rows[2].3, "grace.hopper@example.com");

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("Student added successfully."));
        assert!(out.contains("Student email updated successfully."));
        assert!(out.contains("Student deleted successfully."));
        assert!(out.contains("(4, 'Grace', 'Hopper', 'grace.hopper@example.com', '2024-02-01')"));
        assert!(!out.contains("'Jane'"));
    }

    /// Rejected input leaves the table as it was and the menu keeps going
    #[test]
    fn test_rejected_inputs_write_nothing() {
        let fixture = DatabaseFixture::with_sample_data().unwrap();
        let snapshot = fixture.all_rows();
        let script = "\
2\nGrace\nHopper\n\n2024-02-01\n\n\
3\n1\n\n\n\
4\none\n\n\
0\n";
        let mut console = scripted_console(script);

        run_menu(&mut console, &fixture.connection).unwrap();

        assert_eq!(fixture.all_rows(), snapshot);
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("All fields are required. Student not added."));
        assert!(out.contains("Email cannot be empty. Update not performed."));
        assert!(out.contains("Invalid student ID 'one'. Operation cancelled."));
        assert!(out.ends_with("Exiting the program.\n"));
    }

    /// Every mutation fails; no row changes and the session stays interactive
    #[test]
    fn test_simulated_failures_roll_back() {
        let fixture = DatabaseFixture::with_sample_data().unwrap();
        fixture.fail_all_writes().unwrap();
        let snapshot = fixture.all_rows();
        let script = "\
2\nGrace\nHopper\ngrace@example.com\n2024-02-01\n\n\
3\n1\nnew@example.com\n\n\
4\n1\n\n\
0\n";
        let mut console = scripted_console(script);

        run_menu(&mut console, &fixture.connection).unwrap();

        assert_eq!(fixture.all_rows(), snapshot);
        assert!(fixture.connection.is_autocommit());
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("An error occurred while adding the student: simulated failure"));
        assert!(out
            .contains("An error occurred while updating the student email: simulated failure"));
        assert!(out.contains("An error occurred while deleting the student: simulated failure"));
        assert!(out.contains("Exiting the program."));
    }
}
