// 詳細ログ（--log 指定時のみファイルへ書き出す）

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};

/// グローバルな詳細ログフラグ
pub static VERBOSE_LOGGING: AtomicBool = AtomicBool::new(false);

/// 出力先と開始時刻
struct LogSink {
    out: BufWriter<File>,
    started: Instant,
}

static LOG_SINK: Mutex<Option<LogSink>> = Mutex::new(None);

/// ログファイルを作り直し、詳細ログを有効にする
pub fn init_log_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("ログファイルを作成できません: {}", path.display()))?;

    let mut sink = LOG_SINK.lock().unwrap_or_else(|e| e.into_inner());
    *sink = Some(LogSink {
        out: BufWriter::new(file),
        started: Instant::now(),
    });
    set_verbose(true);
    Ok(())
}

/// 経過秒とスレッド名を付けて 1 行書き込む
pub fn write_log(message: String) {
    let mut sink = LOG_SINK.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(s) = sink.as_mut() {
        let elapsed = s.started.elapsed().as_secs_f64();
        let thread = std::thread::current();
        let name = thread.name().unwrap_or("worker");
        let _ = writeln!(s.out, "[{:>10.3}s {}] {}", elapsed, name, message);
        let _ = s.out.flush();
    }
}

/// ログファイルを閉じ、詳細ログを無効にする
pub fn close_log_file() {
    set_verbose(false);
    let mut sink = LOG_SINK.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(mut s) = sink.take() {
        let _ = s.out.flush();
    }
}

pub fn set_verbose(enabled: bool) {
    VERBOSE_LOGGING.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE_LOGGING.load(Ordering::Relaxed)
}

/// 詳細ログ出力マクロ（ファイル出力）
#[macro_export]
macro_rules! vlog {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            let message = format!($($arg)*);
            $crate::logging::write_log(message);
        }
    };
}
