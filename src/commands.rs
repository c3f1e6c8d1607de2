// Command-line commands
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::allocation::{self, Category};
use crate::config::Config;
use crate::reconcile::RowField;
use crate::recorder::{self, ExportError};
use crate::scene::{default_display_name, SceneSnapshot};
use crate::session::{ObjectIdSelection, Reconciliation, Session};
use crate::state::{self, models::format_matte_ids, DbConnection, ExportResult, MatteIdRecord, ObjectIdRecord};

#[derive(Debug, Serialize)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<E: std::fmt::Display> From<E> for CommandError {
    fn from(error: E) -> Self {
        CommandError {
            message: error.to_string(),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Parser, Debug)]
#[command(name = "matteid", version, about = "Allocate and record matte IDs for render compositing")]
pub struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List projects under the project root.
    Projects,
    /// Show the next free object ID of a category.
    NextId(NextIdArgs),
    /// Reconcile a scene snapshot against presets and the database.
    Status(SceneArgs),
    /// Assign a matte ID to a material in a scene snapshot.
    Assign(AssignArgs),
    /// Reconcile a scene snapshot and record it in the database.
    Export(SceneArgs),
    /// List recorded object IDs.
    Records(ProjectArgs),
    /// Show recorded matte ID rows.
    Lookup(LookupArgs),
    /// Delete recorded rows.
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Project folder name.
    #[arg(long)]
    pub project: String,
}

#[derive(Args, Debug)]
pub struct NextIdArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Asset category: character or prop.
    #[arg(long)]
    pub category: String,
}

#[derive(Args, Debug)]
pub struct SceneArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Asset category: character or prop.
    #[arg(long)]
    pub category: String,

    /// Scene snapshot JSON exported from the host.
    #[arg(long)]
    pub scene: PathBuf,

    /// Display name for multi-matte names (defaults to the asset name's second token).
    #[arg(long)]
    pub display: Option<String>,
}

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Scene snapshot JSON to edit.
    #[arg(long)]
    pub scene: PathBuf,

    /// Material name.
    #[arg(long)]
    pub material: String,

    /// Matte ID to assign.
    #[arg(long)]
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Matte IDs to look up.
    #[arg(long = "matte-id", required = true, num_args = 1..)]
    pub matte_ids: Vec<i64>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Object IDs whose rows are deleted.
    #[arg(long = "object-id", num_args = 1..)]
    pub object_ids: Vec<i64>,

    /// Matte IDs whose rows are deleted.
    #[arg(long = "matte-id", num_args = 1..)]
    pub matte_ids: Vec<i64>,
}

// ==================== OUTPUT TYPES ====================

#[derive(Debug, Serialize)]
pub struct NextIdOutput {
    pub project: String,
    pub category: Category,
    pub object_id: i64,
    pub matte_id_block: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub project: String,
    pub asset_name: String,
    pub display_name: String,
    pub selection: ObjectIdSelection,
    pub reconciliation: Reconciliation,
}

#[derive(Debug, Serialize)]
pub struct DeleteOutput {
    pub object_ids_deleted: usize,
    pub matte_ids_deleted: usize,
}

// ==================== DISPATCH ====================

pub fn execute(cli: Cli) -> CommandResult<()> {
    let config = Config::load(cli.config.as_deref())?;
    let json = cli.json;

    match cli.cmd {
        Command::Projects => {
            let projects = state::storage::list_projects(&config.project_root, &config.project_prefixes)?;
            emit(json, &projects, |projects| {
                for project in projects {
                    println!("{}", project);
                }
            })
        }
        Command::NextId(args) => {
            let output = next_id(&config, args)?;
            emit(json, &output, |o| {
                println!("{} {}: next object ID {}", o.project, o.category, o.object_id);
                println!("matte IDs {}", format_matte_ids(&o.matte_id_block));
            })
        }
        Command::Status(args) => {
            let (_, output) = status(&config, &args)?;
            emit(json, &output, print_status)
        }
        Command::Assign(args) => {
            let mut scene = SceneSnapshot::from_path(&args.scene)?;
            scene.assign(&args.material, args.id)?;
            scene.save(&args.scene)?;
            emit(json, &scene, |scene| {
                println!("{}: {} -> {}", scene.asset_name, args.material, args.id);
            })
        }
        Command::Export(args) => {
            let result = export(&config, &args)?;
            emit(json, &result, |r| {
                println!(
                    "Exported object ID {}: {} matte IDs written, {} skipped",
                    r.object_id, r.matte_ids_written, r.matte_ids_skipped
                );
            })
        }
        Command::Records(args) => {
            let db = open_db(&config, &args.project)?;
            let records = state::list_object_id_records(&db)?;
            emit(json, &records, |records| print_records(records))
        }
        Command::Lookup(args) => {
            let db = open_db(&config, &args.project.project)?;
            let records = state::find_matte_id_records(&db, &args.matte_ids)?;
            emit(json, &records, |records| print_matte_records(records))
        }
        Command::Delete(args) => {
            let output = delete(&config, args)?;
            emit(json, &output, |o| {
                println!(
                    "Deleted {} object ID rows, {} matte ID rows",
                    o.object_ids_deleted, o.matte_ids_deleted
                );
            })
        }
    }
}

fn open_db(config: &Config, project: &str) -> CommandResult<DbConnection> {
    let path = config.database_path(project);
    Ok(state::open_project_db(&path)?)
}

fn next_id(config: &Config, args: NextIdArgs) -> CommandResult<NextIdOutput> {
    let category = Category::parse(&args.category)?;
    let db = open_db(config, &args.project.project)?;
    let existing = state::committed_object_ids(&db)?;

    let range = config.range(category);
    let object_id = allocation::next_available_object_id(category, range, &existing)?;

    Ok(NextIdOutput {
        project: args.project.project,
        category,
        object_id,
        matte_id_block: allocation::matte_id_block(object_id, range.step),
    })
}

fn status(config: &Config, args: &SceneArgs) -> CommandResult<(DbConnection, StatusOutput)> {
    let category = Category::parse(&args.category)?;
    let scene = SceneSnapshot::from_path(&args.scene)?;
    let db = open_db(config, &args.project.project)?;

    let display_name = args
        .display
        .clone()
        .unwrap_or_else(|| default_display_name(&scene.asset_name));

    let mut session = Session::new(config.policy(), Some(category), display_name);
    session.refresh(&db)?;

    let selection = session.select_object_id(&scene.asset_name)?;
    let reconciliation = session.reconcile(selection.id(), scene.live_assignments())?;

    let output = StatusOutput {
        project: args.project.project.clone(),
        asset_name: scene.asset_name,
        display_name: session.display_name,
        selection,
        reconciliation,
    };

    Ok((db, output))
}

fn export(config: &Config, args: &SceneArgs) -> CommandResult<ExportResult> {
    let (db, report) = status(config, args)?;
    let object_id = report.reconciliation.object_id;

    if !report.reconciliation.check.eligible {
        log::warn!("Object ID {} exists in database", object_id);
        return Err(ExportError::ObjectIdAlreadyExists(object_id).into());
    }

    let mut scene = SceneSnapshot::from_path(&args.scene)?;
    let result = recorder::export_assignment(
        &db,
        object_id,
        &scene.asset_name,
        &scene.asset_path,
        &scene.owner,
        &report.reconciliation.rows,
    )?;

    scene.stamp_object_id(object_id);
    scene.save(&args.scene)?;

    Ok(result)
}

fn delete(config: &Config, args: DeleteArgs) -> CommandResult<DeleteOutput> {
    if args.object_ids.is_empty() && args.matte_ids.is_empty() {
        return Err(CommandError {
            message: "Nothing to delete: pass --object-id or --matte-id".to_string(),
        });
    }

    let db = open_db(config, &args.project.project)?;
    let object_ids_deleted = state::delete_object_ids(&db, &args.object_ids)?;
    let matte_ids_deleted = state::delete_matte_ids(&db, &args.matte_ids)?;

    log::info!(
        "Deleted {} object ID rows and {} matte ID rows",
        object_ids_deleted,
        matte_ids_deleted
    );

    Ok(DeleteOutput {
        object_ids_deleted,
        matte_ids_deleted,
    })
}

// ==================== RENDERING ====================

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) -> CommandResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text(value);
    }
    Ok(())
}

/// Print rows as left-aligned columns sized to their widest cell
fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        println!("{}", padded.join("  ").trim_end());
    };

    line(headers.to_vec());
    for row in rows {
        line(row.iter().map(String::as_str).collect());
    }
}

fn print_status(output: &StatusOutput) {
    let report = &output.reconciliation;
    let selection = match output.selection {
        ObjectIdSelection::Booked(id) => format!("{} (booked)", id),
        ObjectIdSelection::Available(id) => format!("{} (available)", id),
    };

    println!("Project:  {}", output.project);
    println!("Asset:    {} [{}]", output.asset_name, output.display_name);
    println!("ObjectID: {}", selection);
    println!();

    let headers: Vec<&str> = RowField::ALL.iter().map(|f| f.header()).collect();
    let rows: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| RowField::ALL.iter().map(|f| row.field(*f)).collect())
        .collect();
    print_table(&headers, &rows);
    println!();

    let presets: Vec<Vec<String>> = report
        .coverage
        .iter()
        .map(|slot| {
            vec![
                slot.matte_id.to_string(),
                slot.tag.clone(),
                slot.status_label().to_string(),
                slot.multi_matte_name.clone(),
            ]
        })
        .collect();
    print_table(&["Preset", "Tag", "Status", "MultiMatte"], &presets);
    println!();

    if report.check.eligible {
        println!(
            "Export ready: {} matte IDs to write, {} skipped",
            report.check.ready, report.check.skipped
        );
    } else {
        println!("Export blocked: object ID {} exists in database", report.object_id);
    }
}

fn print_records(records: &[ObjectIdRecord]) {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.object_id.to_string(),
                r.asset_name.clone(),
                r.asset_path.clone(),
                r.owner.clone(),
                format_matte_ids(&r.matte_ids),
            ]
        })
        .collect();
    print_table(&["ID", "ObjectID", "AssetName", "AssetPath", "Owner", "MatteIDs"], &rows);
}

fn print_matte_records(records: &[MatteIdRecord]) {
    if records.is_empty() {
        println!("No matching matte ID records");
        return;
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.matte_id.to_string(),
                r.color_tag.clone(),
                r.multi_matte_name.clone(),
                r.material_name.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "MatteID", "Color", "MultiMatte", "Material"], &rows);
}
