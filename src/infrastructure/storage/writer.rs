// 全消し手順の書き込み

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::search::Solution;

/// 見つかった手順を書き込むための trait
pub trait SolutionWriter: Send {
    /// 単一の手順を書き込む
    fn write_solution(&mut self, solution: &Solution) -> Result<()>;

    /// 書き込みを完了（フラッシュ）
    fn flush(&mut self) -> Result<()>;

    /// 書き込んだ手順数を取得
    fn count(&self) -> u64;
}

/// JSON Lines 形式（1 行 1 手順）のファイル書き込み
pub struct FileSolutionWriter {
    writer: BufWriter<File>,
    count: u64,
}

impl FileSolutionWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("出力を作成できません: {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            count: 0,
        })
    }
}

impl SolutionWriter for FileSolutionWriter {
    fn write_solution(&mut self, solution: &Solution) -> Result<()> {
        let json = serde_json::to_string(solution)?;
        writeln!(self.writer, "{}", json)?;
        // 途中終了しても最新の最良手順が残るように毎回フラッシュ
        self.writer.flush()?;
        self.count += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl Drop for FileSolutionWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// メモリ内書き込み実装（テスト用）
#[derive(Default)]
pub struct MemorySolutionWriter {
    solutions: Vec<Solution>,
}

impl MemorySolutionWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }
}

impl SolutionWriter for MemorySolutionWriter {
    fn write_solution(&mut self, solution: &Solution) -> Result<()> {
        self.solutions.push(solution.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn count(&self) -> u64 {
        self.solutions.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::{Action, Color};

    fn test_solution() -> Solution {
        Solution {
            moves: 1,
            actions: vec![Action {
                x: 0,
                y: 0,
                color: Color::Orange,
            }],
        }
    }

    #[test]
    fn memory_writer_stores_solutions() {
        let mut writer = MemorySolutionWriter::new();
        writer.write_solution(&test_solution()).unwrap();
        writer.write_solution(&test_solution()).unwrap();
        assert_eq!(writer.count(), 2);
        assert_eq!(writer.solutions().len(), 2);
        assert!(writer.flush().is_ok());
    }

    #[test]
    fn file_writer_writes_json_lines() {
        let path = std::env::temp_dir().join(format!("former_out_{}.jsonl", std::process::id()));
        {
            let mut writer = FileSolutionWriter::create(&path).unwrap();
            writer.write_solution(&test_solution()).unwrap();
            assert_eq!(writer.count(), 1);
        }
        let content = std::fs::read_to_string(&path).unwrap();
        let line = content.lines().next().unwrap();
        let parsed: Solution = serde_json::from_str(line).unwrap();
        assert_eq!(parsed, test_solution());
        let _ = std::fs::remove_file(&path);
    }
}
