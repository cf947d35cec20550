use chrono::{DateTime, Utc};
use log::debug;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::datetime;

/// 現在時刻を更新する間隔のデフォルト値。
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(30);

/// 一定間隔で更新される現在時刻の購読。
///
/// 破棄、または`cancel`を呼ぶと更新を止める。
///
/// # Examples
///
/// ```ignore
/// let mut current_time = CurrentTime::subscribe(DEFAULT_REFRESH_PERIOD);
/// while let Some(now) = current_time.changed().await {
///     render(&now)?;
/// }
/// ```
pub struct CurrentTime {
    receiver: watch::Receiver<DateTime<Utc>>,
    handle: JoinHandle<()>,
}

impl CurrentTime {
    /// `period`ごとに現在時刻を更新するタスクを開始する。
    ///
    /// tokioのランタイム上で呼び出す必要がある。
    pub fn subscribe(period: Duration) -> Self {
        let (sender, receiver) = watch::channel(datetime::now());
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // 最初のtickはすぐに完了する
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if sender.send(datetime::now()).is_err() {
                    break;
                }
            }
        });
        debug!("Refreshing current time every {:?}", period);

        Self { receiver, handle }
    }

    /// 最後に更新された現在時刻を返す。
    pub fn now(&self) -> DateTime<Utc> {
        *self.receiver.borrow()
    }

    /// 次に更新されるまで待ち、更新された時刻を返す。更新が止まった場合は`None`を返す。
    pub async fn changed(&mut self) -> Option<DateTime<Utc>> {
        self.receiver.changed().await.ok()?;
        let now = *self.receiver.borrow_and_update();
        Some(now)
    }

    /// 更新を止める。
    pub fn cancel(self) {}
}

impl Drop for CurrentTime {
    fn drop(&mut self) {
        self.handle.abort();
        debug!("Stopped refreshing current time");
    }
}
