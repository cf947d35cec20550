use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use log::info;

use crate::app::App;
use crate::console::ConsoleTimeItemList;
use crate::datetime;
use crate::form::TimeItemFormState;
use crate::icon::Icon;
use crate::repository::TimeItemRepository;
use crate::time_item::TimeItem;

const HELP: &str = "\
commands:
  title <text>        change the title
  date [YYYY-MM-DD]   change the date (no value keeps the current date)
  time [HH:MM[:SS]]   change the time (no value keeps the current time)
  now                 set the start time to right now
  reset [title|time]  restore the initial values
  submit              save the time item
  cancel              discard the changes
";

/// time itemの作成、編集で共通の引数。
#[derive(Debug, Default, clap::Args)]
pub struct FormArgs {
    #[clap(short = 't', long = "title", help = "Sets the title")]
    pub title: Option<String>,

    #[clap(
        short = 'd',
        long = "date",
        help = "Sets the start date in the format YYYY-MM-DD",
        parse(try_from_str = parse_date),
    )]
    pub date: Option<DateTime<Utc>>,

    #[clap(
        long = "time",
        help = "Sets the start time in the format HH:MM or HH:MM:SS",
        parse(try_from_str = parse_time),
    )]
    pub time: Option<DateTime<Utc>>,

    #[clap(long = "now", help = "Sets the start time to right now")]
    pub now: bool,

    #[clap(long = "reset-title", help = "Restores the initial title")]
    pub reset_title: bool,

    #[clap(long = "reset-time", help = "Restores the initial start time")]
    pub reset_time: bool,

    #[clap(short = 'i', long = "interactive", help = "Edits the values interactively")]
    pub interactive: bool,

    #[clap(long = "dry-run", help = "Shows the preview without saving")]
    pub dry_run: bool,
}

impl FormArgs {
    /// 引数で指定された値を入力状態に反映する。
    ///
    /// 元の値に戻す指定は、他の値より先に反映する。
    pub fn apply(&self, form: &mut TimeItemFormState) {
        if self.reset_title {
            form.reset_title();
        }
        if self.reset_time {
            form.reset_start_time();
        }
        if let Some(title) = &self.title {
            form.set_title(title.clone());
        }
        form.set_date(self.date);
        form.set_time(self.time);
        if self.now {
            form.set_start_time_to_now();
        }
    }
}

/// 入力画面で受け付ける操作。
#[derive(Debug, PartialEq, Eq)]
enum FormCommand {
    Title(String),
    Date(Option<DateTime<Utc>>),
    Time(Option<DateTime<Utc>>),
    Now,
    Reset,
    ResetTitle,
    ResetTime,
    Submit,
    Cancel,
    Help,
}

impl FormCommand {
    fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, value) = match line.split_once(char::is_whitespace) {
            Some((name, value)) => (name, value.trim()),
            None => (line, ""),
        };
        let optional = |value: &str| (!value.is_empty()).then(|| value.to_string());

        let command = match name {
            "title" => FormCommand::Title(value.to_string()),
            "date" => FormCommand::Date(optional(value).map(|v| parse_date(&v)).transpose()?),
            "time" => FormCommand::Time(optional(value).map(|v| parse_time(&v)).transpose()?),
            "now" => FormCommand::Now,
            "reset" => match value {
                "" => FormCommand::Reset,
                "title" => FormCommand::ResetTitle,
                "time" => FormCommand::ResetTime,
                other => bail!("Unknown field to reset: {}", other),
            },
            "submit" => FormCommand::Submit,
            "cancel" => FormCommand::Cancel,
            "help" | "" => FormCommand::Help,
            other => bail!("Unknown command: {}", other),
        };

        Ok(command)
    }
}

/// 開いている入力画面に引数の値を反映し、確定する。
///
/// `interactive`の場合は対話的な操作に移り、`dry_run`の場合はプレビューを表示して破棄する。
pub fn complete_form<R, B, W>(
    app: &mut App<R>,
    args: &FormArgs,
    input: &mut B,
    output: &mut W,
) -> Result<Option<TimeItem>>
where
    R: TimeItemRepository,
    B: BufRead,
    W: Write,
{
    let form = app.form_mut().context("No time item is being edited")?;
    args.apply(form);

    if args.interactive {
        return run_interactive(app, input, output);
    }

    app.render(&mut ConsoleTimeItemList::new(&mut *output), &datetime::now())
        .context("Failed to render the form")?;
    if args.dry_run {
        info!("Dry run, discarding the changes");
        app.cancel();
        return Ok(None);
    }

    let item = app.submit()?;
    writeln!(output, "{} Saved {}: {}", Icon::Check.glyph(), item.title(), item.id())
        .context("Failed to write result")?;

    Ok(Some(item))
}

/// 開いている入力画面を対話的に操作する。
///
/// 確定した場合はtime itemを、キャンセルした場合や入力が終わった場合は`None`を返す。
/// 確定時の検証エラーは表示して入力を続ける。
///
/// # Arguments
///
/// * `app` - 入力画面を開いた状態の`App`
/// * `input` - 操作を読み込む入力
/// * `output` - 画面を表示する出力
pub fn run_interactive<R, B, W>(app: &mut App<R>, input: &mut B, output: &mut W) -> Result<Option<TimeItem>>
where
    R: TimeItemRepository,
    B: BufRead,
    W: Write,
{
    writeln!(output, "{}", HELP).context("Failed to write help")?;
    loop {
        app.render(&mut ConsoleTimeItemList::new(&mut *output), &datetime::now())
            .context("Failed to render the form")?;
        write!(output, "> ").context("Failed to write prompt")?;
        output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        if input.read_line(&mut line).context("Failed to read input")? == 0 {
            info!("Input closed, discarding the changes");
            app.cancel();
            return Ok(None);
        }

        let command = match FormCommand::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(output, "{}", err).context("Failed to write error")?;
                continue;
            }
        };

        let form = app.form_mut().context("No time item is being edited")?;
        match command {
            FormCommand::Title(title) => form.set_title(title),
            FormCommand::Date(date) => form.set_date(date),
            FormCommand::Time(time) => form.set_time(time),
            FormCommand::Now => form.set_start_time_to_now(),
            FormCommand::Reset => form.reset(),
            FormCommand::ResetTitle => form.reset_title(),
            FormCommand::ResetTime => form.reset_start_time(),
            FormCommand::Help => writeln!(output, "{}", HELP).context("Failed to write help")?,
            FormCommand::Cancel => {
                app.cancel();
                return Ok(None);
            }
            FormCommand::Submit => match app.submit() {
                Ok(item) => return Ok(Some(item)),
                Err(err) => writeln!(output, "{:#}", err).context("Failed to write error")?,
            },
        }
    }
}

/// 日付をパースする。
///
/// 時刻は使わないため、Localタイムゾーンの00:00:00とする。
pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let naive_date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse date: {}", s))?;
    let naive_datetime = naive_date
        .and_hms_opt(0, 0, 0)
        .context("Failed to set hour, minute, and second")?;

    from_local(&naive_datetime)
}

/// 時刻をパースする。
///
/// 日付は使わないため、Localタイムゾーンの今日の日付とする。
pub fn parse_time(s: &str) -> Result<DateTime<Utc>> {
    let naive_time = NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .with_context(|| format!("Failed to parse time: {}", s))?;
    let today = datetime::now().with_timezone(&Local).date_naive();

    from_local(&NaiveDateTime::new(today, naive_time))
}

fn from_local(naive_datetime: &NaiveDateTime) -> Result<DateTime<Utc>> {
    let datetime = Local
        .from_local_datetime(naive_datetime)
        .earliest()
        .context("Failed to convert to DateTime<Local>")?
        .to_utc();

    Ok(datetime)
}
