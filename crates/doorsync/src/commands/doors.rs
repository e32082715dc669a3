//! Door command handlers.

use doorsync_core::{Door, DoorBridge};

use crate::cli::{DoorsArgs, DoorsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;
use crate::view::{self, DoorRow, DoorView};

fn print_door(door: &Door, global: &GlobalOpts) -> Result<(), CliError> {
    let view = DoorView::from(door);
    let out = output::render_single(global.output, &view, view::detail, |v| v.state.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    bridge: &DoorBridge,
    args: DoorsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DoorsCommand::List => {
            let doors = bridge.doors_status().await?;
            let views: Vec<DoorView> = doors.iter().map(DoorView::from).collect();
            let out = output::render_list(
                global.output,
                &views,
                |v| DoorRow::from(v),
                |v| v.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DoorsCommand::Get { door } => print_door(&bridge.door(&door).await?, global),

        DoorsCommand::Status { door } => print_door(&bridge.door_status(&door).await?, global),

        DoorsCommand::Open { door } => command(bridge, &door, "open", global).await,

        DoorsCommand::Close { door } => command(bridge, &door, "close", global).await,
    }
}

/// Issue `action`, then show the door as reported right after the command.
async fn command(
    bridge: &DoorBridge,
    door: &str,
    action: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    bridge.door_action(door, action).await?;
    let current = bridge.door(door).await?;
    if !global.quiet {
        eprintln!("✓ {action} command accepted for {}", current.name);
    }
    print_door(&current, global)
}
