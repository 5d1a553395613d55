// ParallelExecutor - セグメントごとのスレッド起動と合流

use crate::core::{
    BenchError, BenchResult, CancellationToken, DiagnosticReporter, PartitionableTask, Segment,
};
use std::any::Any;
use std::thread;

/// セグメント1つにつきOSスレッドを1本起動し、全てを合流させる
///
/// ワーカーの失敗（`Err` もしくは panic）はそのワーカーの枠だけを
/// `Partial::default()` に落とし、兄弟ワーカーは止めない。
pub struct ParallelExecutor<'r, R: ?Sized> {
    reporter: &'r R,
}

impl<'r, R> ParallelExecutor<'r, R>
where
    R: DiagnosticReporter + ?Sized,
{
    pub fn new(reporter: &'r R) -> Self {
        Self { reporter }
    }

    /// 全セグメントを並列実行し、セグメント順に部分結果を返す
    pub fn run<'a, T>(
        &self,
        task: &T,
        segments: &[Segment],
        views: Vec<T::View<'a>>,
        cancel: &CancellationToken,
    ) -> BenchResult<Vec<T::Partial>>
    where
        T: PartitionableTask + 'a,
    {
        if views.len() != segments.len() {
            return Err(BenchError::configuration(format!(
                "ビュー数 {} とセグメント数 {} が一致しません",
                views.len(),
                segments.len()
            )));
        }

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(segments.len());

            for (worker, (&segment, view)) in segments.iter().zip(views).enumerate() {
                let spawned = thread::Builder::new()
                    .name(format!("segment-{worker}"))
                    .spawn_scoped(scope, move || task.execute_on_segment(segment, view, cancel));

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(source) => {
                        // 起動済みのワーカーを止めてから合流する
                        cancel.cancel();
                        for handle in handles {
                            let _ = handle.join();
                        }
                        return Err(BenchError::thread_spawn(worker, source));
                    }
                }
            }

            let partials = handles
                .into_iter()
                .enumerate()
                .map(|(worker, handle)| match self.settle(worker, handle.join()) {
                    Settled::Completed(partial) => {
                        if task.is_early_exit(&partial) {
                            self.reporter.report_early_exit(worker);
                        }
                        partial
                    }
                    Settled::Failed(partial) => partial,
                })
                .collect();

            Ok(partials)
        })
    }

    fn settle<P: Default>(&self, worker: usize, joined: thread::Result<BenchResult<P>>) -> Settled<P> {
        let error = match joined {
            Ok(Ok(partial)) => return Settled::Completed(partial),
            Ok(Err(error)) => error,
            Err(payload) => BenchError::worker(worker, panic_message(payload.as_ref())),
        };

        self.reporter.report_worker_failure(worker, &error.to_string());
        Settled::Failed(P::default())
    }
}

/// 合流したワーカーの部分結果
enum Settled<P> {
    Completed(P),
    /// 失敗したワーカーの枠。既定値で埋めてあり、早期終了としては扱わない
    Failed(P),
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
