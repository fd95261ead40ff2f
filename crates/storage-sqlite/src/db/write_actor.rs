use std::any::Any;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use atlas_core::errors::{DatabaseError, Error, Result};

// A job runs against the writer's dedicated connection. Its output is boxed as
// `Any` so one channel can carry jobs of every return type.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type AnyResult = Result<Box<dyn Any + Send + 'static>>;

const QUEUE_CAPACITY: usize = 1024;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job<Box<dyn Any + Send + 'static>>, oneshot::Sender<AnyResult>)>,
}

impl WriteHandle {
    /// Executes `job` on the writer's connection inside an immediate
    /// transaction. Jobs run one at a time in submission order.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_unavailable("writer actor has stopped"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_unavailable("writer actor dropped the reply"))??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::Database(DatabaseError::Internal("writer result type mismatch".into())))
    }
}

fn writer_unavailable(message: &str) -> Error {
    Error::Database(DatabaseError::WriterUnavailable(message.to_string()))
}

/// Spawns the single database writer. It holds one pooled connection for its
/// whole lifetime and stops once every [`WriteHandle`] is dropped.
///
/// If no connection can be acquired the actor exits immediately, and every
/// later `exec` fails with [`DatabaseError::WriterUnavailable`].
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<AnyResult>,
    )>(QUEUE_CAPACITY);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                log::error!("Writer actor could not acquire a connection: {}", e);
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: AnyResult = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The caller may have given up waiting.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
