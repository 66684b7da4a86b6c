//! 并发批处理模块：
//! - 固定数量的工作线程从共享游标领取任务，并发数不超过上限
//! - 单个任务失败（包括 panic）不影响其它任务
//! - 主线程按完成顺序回调进度，结果按输入顺序返回

use std::{
    panic::{self, AssertUnwindSafe},
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread,
};

use anyhow::{anyhow, Result};

use crate::icon::IconId;

/// 以不超过 `concurrency` 的并发度执行 `task`
pub(crate) fn run_bounded<T, R, F, P>(
    items: &[T],
    concurrency: usize,
    task: F,
    mut on_done: P,
) -> Vec<Result<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync,
    P: FnMut(&T, &Result<R>),
{
    if items.is_empty() {
        return Vec::new();
    }
    let workers = concurrency.clamp(1, items.len());
    let cursor = AtomicUsize::new(0);
    let mut slots: Vec<Option<Result<R>>> = items.iter().map(|_| None).collect();

    thread::scope(|s| {
        let (tx, rx) = mpsc::channel::<(usize, Result<R>)>();
        for _ in 0..workers {
            let tx = tx.clone();
            let cursor = &cursor;
            let task = &task;
            s.spawn(move || loop {
                let idx = cursor.fetch_add(1, Ordering::SeqCst);
                let Some(item) = items.get(idx) else { break };
                let res = panic::catch_unwind(AssertUnwindSafe(|| task(item)))
                    .unwrap_or_else(|_| Err(anyhow!("任务异常终止")));
                if tx.send((idx, res)).is_err() {
                    break;
                }
            });
        }
        drop(tx);

        for (idx, res) in rx {
            on_done(&items[idx], &res);
            slots[idx] = Some(res);
        }
    });

    slots
        .into_iter()
        .map(|s| s.unwrap_or_else(|| Err(anyhow!("任务未返回结果"))))
        .collect()
}

/// 单次进度快照
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Progress {
    pub(crate) completed: usize,
    pub(crate) total: usize,
    pub(crate) percentage: u32,
}

/// 进度计数器
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    total: usize,
    completed: usize,
}

impl ProgressTracker {
    pub(crate) fn new(total: usize) -> Self {
        Self { total, completed: 0 }
    }

    /// 完成一项并返回当前进度
    pub(crate) fn update(&mut self) -> Progress {
        self.completed += 1;
        let percentage = if self.total == 0 {
            100
        } else {
            ((self.completed as f64 / self.total as f64) * 100.0).round() as u32
        };
        Progress { completed: self.completed, total: self.total, percentage }
    }

    pub(crate) fn completed(&self) -> usize {
        self.completed
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }
}

/// 批量下载结果汇总
#[derive(Debug, Default)]
pub(crate) struct BatchReport {
    pub(crate) created: Vec<PathBuf>,
    pub(crate) skipped: Vec<PathBuf>,
    pub(crate) failed: Vec<(IconId, String)>,
}

impl BatchReport {
    pub(crate) fn is_empty(&self) -> bool {
        self.created.is_empty() && self.skipped.is_empty() && self.failed.is_empty()
    }
}
