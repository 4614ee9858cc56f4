// フォーマー全消し探索 - コマンドライン

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use crossbeam_channel::{unbounded, Receiver};

use former_solver::domain::grid::Grid;
use former_solver::domain::search::SolverEvent;
use former_solver::infrastructure::executor::ParallelConfig;
use former_solver::infrastructure::storage::{load_board, FileSolutionWriter, SolutionWriter};
use former_solver::logging;
use former_solver::presentation::{render_board, steps};
use former_solver::{vlog, Algorithm, SolveService};

#[derive(Parser, Debug)]
#[command(name = "former")]
#[command(about = "フォーマー盤面の全消し最短手順を探索する")]
struct Cli {
    /// 詳細ログの出力先
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 盤面ファイルを読み込んで探索する
    Solve {
        /// 盤面ファイル（O/B/G/P、先頭行が最上段）
        file: PathBuf,
        /// random | random_mt | beam | infinite
        algorithm: String,
        /// ソルバーごとの位置パラメータ（不正な値は既定値）
        params: Vec<String>,
        /// 改善した解を JSON Lines で追記する
        #[arg(long)]
        out: Option<PathBuf>,
        /// ワーカースレッド数（既定は CPU 数）
        #[arg(long)]
        workers: Option<usize>,
    },
    /// 対話的に盤面を消していく
    Play {
        /// 盤面ファイル（省略時はランダム盤面）
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log {
        logging::init_log_file(path)?;
    }

    let result = match cli.command {
        Command::Solve {
            file,
            algorithm,
            params,
            out,
            workers,
        } => solve(file, &algorithm, &params, out, workers),
        Command::Play { file } => play(file),
    };
    logging::close_log_file();
    result
}

fn solve(
    file: PathBuf,
    algorithm: &str,
    params: &[String],
    out: Option<PathBuf>,
    workers: Option<usize>,
) -> Result<()> {
    let algorithm: Algorithm = algorithm.parse()?;
    let grid = load_board(&file)?;
    println!("{}", render_board(&grid));
    println!("連結領域: {}", grid.count_clusters());

    let writer = match &out {
        Some(path) => Some(FileSolutionWriter::create(path)?),
        None => None,
    };

    let parallel = match workers {
        Some(n) if n > 0 => ParallelConfig::new(n),
        _ => ParallelConfig::default(),
    };
    vlog!("solve: {} / {} / workers={}", file.display(), algorithm, parallel.num_workers);
    vlog!("盤面:\n{}", grid.to_text());

    let (tx, rx) = unbounded();
    let printer = thread::spawn(move || print_events(rx, writer));

    let service = SolveService::new(parallel);
    let result = service.run(&grid, algorithm, params, tx);

    let written = printer
        .join()
        .map_err(|_| anyhow!("表示スレッドが異常終了しました"))??;
    if let Some(path) = &out {
        println!("{} 件の解を {} に書き出しました", written, path.display());
    }

    match result? {
        Some(solution) => {
            println!("最短手数: {}", solution.moves);
            for step in steps(&solution.actions) {
                println!("{}", step);
            }
        }
        None => println!("全消し手順は見つかりませんでした"),
    }
    Ok(())
}

/// イベントを表示し、改善解をファイルへ書き出す。書き出し件数を返す
fn print_events(rx: Receiver<SolverEvent>, mut writer: Option<FileSolutionWriter>) -> Result<u64> {
    for event in rx.iter() {
        match event {
            SolverEvent::Log(msg) => println!("{}", msg),
            SolverEvent::NewBest(solution) => {
                println!("新しい最良解: {} 手", solution.moves);
                if let Some(w) = writer.as_mut() {
                    w.write_solution(&solution)?;
                }
            }
            SolverEvent::Progress { percent } => println!("進捗 {}%", percent),
            SolverEvent::Throughput { completed, rate } => {
                println!("完了タスク {} ({:.0} タスク/秒)", completed, rate)
            }
            SolverEvent::RunPlan(plan) => println!("段階開始: {}", plan),
            SolverEvent::BeamRound {
                round,
                candidates,
                best_kept,
                worst_kept,
                worst,
            } => println!(
                "ラウンド {}: 候補 {} / 最良 {:.3} / 保持最悪 {:.3} / 最悪 {:.3}",
                round, candidates, best_kept, worst_kept, worst
            ),
        }
    }
    match writer.as_mut() {
        Some(w) => {
            w.flush()?;
            Ok(w.count())
        }
        None => Ok(0),
    }
}

fn play(file: Option<PathBuf>) -> Result<()> {
    let mut grid = match &file {
        Some(path) => load_board(path)?,
        None => Grid::random(&mut rand::thread_rng()),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        println!("{}", render_board(&grid));
        println!("連結領域: {} / 手数: {}", grid.count_clusters(), grid.action_count());
        if grid.is_cleared() {
            break;
        }
        print!("x y > ");
        stdout.flush().context("標準出力に書き込めません")?;

        let line = match lines.next() {
            Some(line) => line.context("標準入力を読み込めません")?,
            None => break,
        };
        let line = line.trim();
        if line == "q" {
            break;
        }
        match parse_coords(line) {
            Some((x, y)) => grid.clear_region(x, y),
            None => println!("\"x y\" の形式で入力してください"),
        }
    }

    println!("スコア: {} 手", grid.action_count());
    for step in steps(grid.actions()) {
        println!("{}", step);
    }
    Ok(())
}

fn parse_coords(line: &str) -> Option<(isize, isize)> {
    let mut it = line.split_whitespace();
    let x = it.next()?.parse().ok()?;
    let y = it.next()?.parse().ok()?;
    Some((x, y))
}
