use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

use timesince::add_command::{add_command, AddArgs};
use timesince::app::App;
use timesince::edit_command::{edit_command, EditArgs};
use timesince::list_command::list_command;
use timesince::remove_command::{clear_command, remove_command, ClearArgs, RemoveArgs};
use timesince::repository::JsonFileRepository;
use timesince::watch_command::{watch_command, WatchArgs};

/// イベントからの経過時間を表示するCLIアプリケーション。
///
/// # Examples
/// ```
/// $ cargo run -- add --title "Moved house" --date 2021-01-01
/// $ cargo run -- watch --seconds
/// ```
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    #[clap(short = 'v', long = "verbose", help = "Shows debug logs")]
    verbose: bool,

    #[clap(
        long = "data-file",
        help = "Sets the file to store time items in",
        parse(from_os_str)
    )]
    data_file: Option<PathBuf>,

    #[clap(subcommand)]
    subcommand: SubCommands,
}

/// サブコマンドを表す列挙型。
#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Shows the time elapsed since each time item
    List,
    /// Keeps showing the time elapsed since each time item
    Watch(WatchArgs),
    /// Adds a new time item
    Add(AddArgs),
    /// Edits a time item
    Edit(EditArgs),
    /// Removes a time item
    Remove(RemoveArgs),
    /// Removes all time items
    Clear(ClearArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logger(args.verbose)?;

    let repository = JsonFileRepository::resolve(args.data_file)?;
    let mut app = App::load(Arc::new(repository))?;

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    match args.subcommand {
        SubCommands::List => list_command(&app, &mut output)?,
        SubCommands::Watch(watch) => watch_command(&mut app, watch, &mut output).await?,
        SubCommands::Add(add) => {
            add_command(&mut app, add, &mut input, &mut output)?;
        }
        SubCommands::Edit(edit) => {
            edit_command(&mut app, edit, &mut input, &mut output)?;
        }
        SubCommands::Remove(remove) => remove_command(&mut app, remove, &mut output)?,
        SubCommands::Clear(clear) => clear_command(&mut app, clear, &mut input, &mut output)?,
    }

    Ok(())
}

/// ログの出力先と形式を設定する。
///
/// 画面の表示と混ざらないように標準エラー出力に出す。
fn setup_logger(verbose: bool) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue);
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
        .context("Failed to set up the logger")?;

    Ok(())
}
