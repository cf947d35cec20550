use std::io::Write;

use chrono::{DateTime, Utc};

use crate::datetime::date_to_display_format;
use crate::elapsed::compute_elapsed;
use crate::error::RenderError;
use crate::form::{FormMode, TimeItemFormState};
use crate::icon::Icon;
use crate::time_item::TimeItem;

/// 描画に失敗した時に表示するメッセージ。
pub const ERROR_MESSAGE: &str = "Sorry, the app has encountered an issue";

/// Consoleに画面を表示するためのtrait。
pub trait ConsolePresenter {
    /// time itemの一覧を表示する。
    ///
    /// # Arguments
    ///
    /// * `time_items` - 表示するtime item
    /// * `now` - 経過時間の計算に使う現在時刻
    fn show_home_view(&mut self, time_items: &[TimeItem], now: &DateTime<Utc>)
        -> Result<(), RenderError>;

    /// 入力中のtime itemのプレビューと入力状態を表示する。
    fn show_form_view(
        &mut self,
        form: &TimeItemFormState,
        now: &DateTime<Utc>,
    ) -> Result<(), RenderError>;

    /// 描画に失敗したことを表示する。
    fn show_error_view(&mut self) -> Result<(), RenderError>;
}

/// time itemをMarkdownのlist形式で表示する。
pub struct ConsoleTimeItemList<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> ConsoleTimeItemList<'a, W> {
    /// 新しい`ConsoleTimeItemList`を返す。
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    fn write_time_item(&mut self, item: &TimeItem, now: &DateTime<Utc>) -> Result<(), RenderError> {
        let elapsed = compute_elapsed(&item.start_time(), now);
        writeln!(self.writer, "- {}", item.title())?;
        writeln!(self.writer, "  Total Days: {}", elapsed.days)?;
        writeln!(self.writer, "  {}", elapsed.clock_string())?;
        writeln!(
            self.writer,
            "  {} {}",
            Icon::Calendar.glyph(),
            date_to_display_format(&item.start_time())
        )?;

        Ok(())
    }
}

impl<'a, W: Write> ConsolePresenter for ConsoleTimeItemList<'a, W> {
    fn show_home_view(
        &mut self,
        time_items: &[TimeItem],
        now: &DateTime<Utc>,
    ) -> Result<(), RenderError> {
        if time_items.is_empty() {
            writeln!(self.writer, "No time items yet.")?;
        }
        for item in time_items {
            self.write_time_item(item, now)?;
            writeln!(
                self.writer,
                "  {} edit / {} remove: {}",
                Icon::Edit.glyph(),
                Icon::TrashBin.glyph(),
                item.id()
            )?;
        }
        writeln!(self.writer, "{} add a new time item", Icon::Plus.glyph())?;

        Ok(())
    }

    fn show_form_view(
        &mut self,
        form: &TimeItemFormState,
        now: &DateTime<Utc>,
    ) -> Result<(), RenderError> {
        let heading = match form.mode() {
            FormMode::Create => "New time item",
            FormMode::Edit => "Edit time item",
        };
        writeln!(self.writer, "## {}", heading)?;

        let preview = form.preview_item()?;
        self.write_time_item(&preview, now)?;

        writeln!(
            self.writer,
            "  title: {}{}",
            form.title(),
            dirty_mark(form.is_title_dirty())
        )?;
        writeln!(
            self.writer,
            "  {} start: {}{}",
            Icon::Time.glyph(),
            form.start_time().format("%Y-%m-%d %H:%M:%S UTC"),
            dirty_mark(form.is_start_time_dirty())
        )?;
        if form.can_reset() {
            writeln!(self.writer, "  {} reset available", Icon::Undo.glyph())?;
        }

        Ok(())
    }

    fn show_error_view(&mut self) -> Result<(), RenderError> {
        writeln!(self.writer, "{}", ERROR_MESSAGE)?;

        Ok(())
    }
}

fn dirty_mark(dirty: bool) -> &'static str {
    if dirty {
        " (changed)"
    } else {
        ""
    }
}
