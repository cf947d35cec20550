use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::info;
use uuid::Uuid;

use crate::app::App;
use crate::icon::Icon;
use crate::repository::TimeItemRepository;

/// `remove`サブコマンドの引数を表す構造体。
#[derive(Debug, clap::Args)]
pub struct RemoveArgs {
    #[clap(help = "Id of the time item to remove")]
    id: Uuid,
}

/// `clear`サブコマンドの引数を表す構造体。
#[derive(Debug, clap::Args)]
pub struct ClearArgs {
    #[clap(short = 'y', long = "yes", help = "Skips the confirmation")]
    yes: bool,
}

/// `remove`サブコマンドの処理を行う。
///
/// 指定したidのtime itemがない場合はエラーを返す。
pub fn remove_command<R: TimeItemRepository, W: Write>(
    app: &mut App<R>,
    remove: RemoveArgs,
    output: &mut W,
) -> Result<()> {
    let title = app
        .collection()
        .get(remove.id)
        .map(|item| item.title().to_string())
        .unwrap_or_default();
    app.remove_item(remove.id)
        .with_context(|| format!("Failed to remove the time item {}", remove.id))?;

    writeln!(output, "{} Removed {}: {}", Icon::TrashBin.glyph(), title, remove.id)
        .context("Failed to write result")?;

    Ok(())
}

/// `clear`サブコマンドの処理を行う。
///
/// `--yes`が指定されていない場合は確認してから、すべてのtime itemを削除する。
pub fn clear_command<R, B, W>(
    app: &mut App<R>,
    clear: ClearArgs,
    input: &mut B,
    output: &mut W,
) -> Result<()>
where
    R: TimeItemRepository,
    B: BufRead,
    W: Write,
{
    if !clear.yes {
        write!(
            output,
            "Remove all {} time items? [y/N] ",
            app.collection().len()
        )
        .context("Failed to write confirmation")?;
        output.flush().context("Failed to flush output")?;

        let mut answer = String::new();
        input
            .read_line(&mut answer)
            .context("Failed to read confirmation")?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            info!("Clear cancelled.");
            return Ok(());
        }
    }

    app.clear();
    writeln!(output, "{} Removed all time items", Icon::TrashBin.glyph())
        .context("Failed to write result")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use super::{clear_command, remove_command, ClearArgs, RemoveArgs};
    use crate::app::App;
    use crate::error::TimeItemError;
    use crate::repository::MockTimeItemRepository;
    use crate::time_item::{new_time_item, TimeItem, TimeItemFields};

    fn app(items: Vec<TimeItem>, saves: usize, clears: usize) -> App<MockTimeItemRepository> {
        let mut repository = MockTimeItemRepository::new();
        repository
            .expect_load()
            .returning(move || Ok(Some(items.clone())));
        repository.expect_save().times(saves).returning(|_| Ok(()));
        repository.expect_clear().times(clears).returning(|| Ok(()));
        App::load(Arc::new(repository)).unwrap()
    }

    fn item(title: &str) -> TimeItem {
        new_time_item(TimeItemFields::new(title, Some(Utc::now()))).unwrap()
    }

    #[test]
    fn test_remove_command() {
        let target = item("A");
        let mut app = app(vec![target.clone(), item("B")], 1, 0);
        let mut output = Vec::new();

        remove_command(&mut app, RemoveArgs { id: target.id() }, &mut output).unwrap();

        assert_eq!(app.collection().len(), 1);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("🗑 Removed A: {}\n", target.id())
        );
    }

    #[test]
    fn test_remove_command_not_found() {
        let mut app = app(vec![item("A")], 0, 0);
        let missing = Uuid::new_v4();

        let err = remove_command(&mut app, RemoveArgs { id: missing }, &mut Vec::<u8>::new()).unwrap_err();

        assert_eq!(
            err.downcast_ref::<TimeItemError>(),
            Some(&TimeItemError::NotFound(missing))
        );
    }

    #[rstest]
    #[case::yes_flag(true, "", 1, 0)]
    #[case::confirmed(false, "y\n", 1, 0)]
    #[case::declined(false, "n\n", 0, 2)]
    #[case::no_answer(false, "", 0, 2)]
    fn test_clear_command(
        #[case] yes: bool,
        #[case] answer: &str,
        #[case] clears: usize,
        #[case] remaining: usize,
    ) {
        let mut app = app(vec![item("A"), item("B")], 0, clears);
        let mut input = Cursor::new(answer.as_bytes().to_vec());

        clear_command(&mut app, ClearArgs { yes }, &mut input, &mut Vec::<u8>::new()).unwrap();

        assert_eq!(app.collection().len(), remaining);
    }
}
