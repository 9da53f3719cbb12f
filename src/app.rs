//! Session driver: configuration, connection, menu, shutdown.

use crate::config;
use crate::console::Console;
use crate::core::db::{self, ConnectParams};
use crate::core::{Result, StudentDbError};
use crate::menu;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{error, info};

/// Runs one interactive session.
///
/// Loads `section` from the configuration at `config_path`, connects, and
/// runs the menu. The connection is closed exactly once on the way out,
/// whether the menu ended normally or with an error. When connecting fails
/// no menu is shown and the connection error is returned after the (no-op)
/// close.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config_path: &Path,
    section: &str,
) -> Result<()> {
    let settings = match config::load_config(config_path, section) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            console.println(format!(
                "An error occurred while loading the configuration: {}",
                e
            ))?;
            return Err(e.into());
        }
    };

    let connected = ConnectParams::from_config(&settings)
        .map_err(StudentDbError::from)
        .and_then(|params| db::connect(&params));

    let (connection, connect_error, announced) = match connected {
        Ok(conn) => {
            let announced = console.println("Connection to the database was successful.");
            (Some(conn), None, announced)
        }
        Err(e) => {
            let announced = console.println(format!(
                "An error occurred while connecting to the database: {}",
                e
            ));
            (None, Some(e), announced)
        }
    };

    // A console that cannot even announce the connection gets no menu, but
    // the connection is still closed below.
    let session = match (&connection, announced) {
        (Some(conn), Ok(())) => menu::run_menu(console, conn),
        (_, announced) => announced,
    };

    if let Some(message) = db::close(connection) {
        console.println(message)?;
    }
    info!("session finished");

    session?;
    match connect_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
