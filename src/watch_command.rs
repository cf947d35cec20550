use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{error, info};
use tokio::time::{sleep, Duration};

use crate::app::App;
use crate::console::{ConsolePresenter, ConsoleTimeItemList};
use crate::repository::TimeItemRepository;
use crate::ticker::{CurrentTime, DEFAULT_REFRESH_PERIOD};

/// 描画に失敗してからホーム画面に戻るまでの時間。
pub const RECOVERY_DELAY: Duration = Duration::from_secs(3);

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// `watch`サブコマンドの引数を表す構造体。
#[derive(Debug, clap::Args)]
pub struct WatchArgs {
    #[clap(
        short = 's',
        long = "seconds",
        help = "Refreshes every second instead of every 30 seconds"
    )]
    seconds: bool,
}

/// `watch`サブコマンドの処理を行う。
///
/// 現在時刻が更新されるたびにホーム画面を描画し直す。Ctrl-Cで終了する。
pub async fn watch_command<R, W>(app: &mut App<R>, watch: WatchArgs, output: &mut W) -> Result<()>
where
    R: TimeItemRepository,
    W: Write,
{
    let period = if watch.seconds {
        Duration::from_secs(1)
    } else {
        DEFAULT_REFRESH_PERIOD
    };
    let mut current_time = CurrentTime::subscribe(period);
    let boundary = ErrorBoundary::new(RECOVERY_DELAY);

    loop {
        write!(output, "{}", CLEAR_SCREEN).context("Failed to clear the screen")?;
        boundary.render(app, output, &current_time.now()).await?;
        output.flush().context("Failed to flush output")?;

        tokio::select! {
            changed = current_time.changed() => {
                if changed.is_none() {
                    break;
                }
            }
            result = tokio::signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl-C")?;
                info!("Stopping watch.");
                break;
            }
        }
    }
    current_time.cancel();

    Ok(())
}

/// 描画中のエラーを受け止め、エラー画面を表示してから初期状態に戻す。
pub struct ErrorBoundary {
    delay: Duration,
}

impl ErrorBoundary {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// 表示中の画面を描画する。
    ///
    /// 描画に失敗した場合はエラー画面を表示し、`delay`だけ待ってからホーム画面に戻して`true`を返す。
    /// エラー画面も表示できない場合はエラーを返す。
    pub async fn render<R, W>(
        &self,
        app: &mut App<R>,
        output: &mut W,
        now: &DateTime<Utc>,
    ) -> Result<bool>
    where
        R: TimeItemRepository,
        W: Write,
    {
        let result = app.render(&mut ConsoleTimeItemList::new(&mut *output), now);
        let Err(err) = result else {
            return Ok(false);
        };

        error!("Unrecoverable render error: {}", err);
        ConsoleTimeItemList::new(&mut *output)
            .show_error_view()
            .context("Failed to show the error view")?;
        output.flush().context("Failed to flush output")?;
        sleep(self.delay).await;
        app.reset_to_home();

        Ok(true)
    }
}
