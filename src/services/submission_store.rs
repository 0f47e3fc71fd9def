//! 提交记录存储 - 业务能力层
//!
//! 按 `<根目录>/<任务ID>/<提交者ID>.json` 的布局落盘，一条提交
//! 一个文件。写入走临时文件再改名，避免读到半截记录；同一
//! 提交者重复提交直接覆盖，后写的胜出。

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{AppResult, StoreError};
use crate::models::Submission;

/// 进程内临时文件序列号，保证同键并发写入各用各的临时路径
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// 提交记录存储
///
/// 职责：
/// - 序列化 / 反序列化提交记录
/// - 维护目录布局
/// - 不关心记录内容的语义
pub struct SubmissionStore {
    root: PathBuf,
}

impl SubmissionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 写入一条提交记录（同键覆盖）
    pub async fn put(&self, task_id: &str, submission: &Submission) -> AppResult<PathBuf> {
        let dir = self.root.join(task_id);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| write_failed(&dir, e))?;

        let path = dir.join(format!("{}.json", submission.submitter_id));
        let tmp_path = dir.join(format!(
            "{}.json.tmp.{}-{}",
            submission.submitter_id,
            std::process::id(),
            TMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));

        let json = serde_json::to_string_pretty(submission)
            .map_err(|e| write_failed(&path, e))?;

        // 先写临时文件再原子改名，读方永远看不到半截文件。
        // 临时文件名带进程号和序列号：同键并发写入时各自持有
        // 独立的临时文件，后改名的整体覆盖先改名的。
        fs::write(&tmp_path, json)
            .await
            .map_err(|e| write_failed(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, &path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(write_failed(&path, e));
        }

        info!(
            "💾 提交记录已保存: 任务 {} / 提交者 {}",
            task_id, submission.submitter_id
        );
        Ok(path)
    }

    /// 读取一条提交记录
    pub async fn get(&self, task_id: &str, submitter_id: &str) -> AppResult<Submission> {
        let path = self.root.join(task_id).join(format!("{}.json", submitter_id));

        let json = match fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    task_id: task_id.to_string(),
                    submitter_id: submitter_id.to_string(),
                }
                .into());
            }
            Err(e) => return Err(read_failed(&path, e)),
        };

        let submission = serde_json::from_str(&json).map_err(|e| read_failed(&path, e))?;
        Ok(submission)
    }

    /// 列出一个任务下的全部提交记录
    ///
    /// 任务目录不存在视为空任务。单个文件损坏或不可读时记警告
    /// 跳过，不影响其余记录。
    pub async fn list(&self, task_id: &str) -> AppResult<Vec<Submission>> {
        let dir = self.root.join(task_id);

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("任务目录不存在，视为空任务: {}", dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(read_failed(&dir, e)),
        };

        let mut submissions = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| read_failed(&dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let json = match fs::read_to_string(&path).await {
                Ok(json) => json,
                Err(e) => {
                    warn!("⚠️ 读取提交记录失败，跳过: {} - {}", path.display(), e);
                    continue;
                }
            };
            match serde_json::from_str::<Submission>(&json) {
                Ok(submission) => submissions.push(submission),
                Err(e) => {
                    warn!("⚠️ 提交记录格式无效，跳过: {} - {}", path.display(), e);
                }
            }
        }

        // 目录迭代顺序不稳定，按提交者 ID 排序保证输出确定
        submissions.sort_by(|a, b| a.submitter_id.cmp(&b.submitter_id));

        debug!("任务 {} 共 {} 条提交记录", task_id, submissions.len());
        Ok(submissions)
    }
}

fn read_failed(path: &Path, source: impl std::error::Error + Send + Sync + 'static) -> crate::error::AppError {
    crate::error::AppError::store_read_failed(path.display().to_string(), source)
}

fn write_failed(path: &Path, source: impl std::error::Error + Send + Sync + 'static) -> crate::error::AppError {
    crate::error::AppError::store_write_failed(path.display().to_string(), source)
}
