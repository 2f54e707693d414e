#[cfg(feature = "rayon")]
use crate::{Error, Result};

/// Number of worker threads used by the row parallel algorithms
/// Without the `rayon` feature every algorithm runs on the calling thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumThreads {
    #[default]
    AllCpus,
    Count(usize),
}

impl NumThreads {
    pub(crate) fn is_parallel(&self) -> bool {
        cfg!(feature = "rayon") && !matches!(self, NumThreads::Count(count) if *count <= 1)
    }

    #[cfg(feature = "rayon")]
    pub(crate) fn thread_pool(&self) -> Result<rayon::ThreadPool> {
        let mut pool_builder = rayon::ThreadPoolBuilder::new();
        if let NumThreads::Count(count) = *self {
            pool_builder = pool_builder.num_threads(count);
        }

        pool_builder
            .build()
            .map_err(|e| Error::InvalidArgument(format!("Failed to create threadpool: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_thread_is_sequential() {
        assert!(!NumThreads::Count(0).is_parallel());
        assert!(!NumThreads::Count(1).is_parallel());
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn thread_pool_uses_the_requested_thread_count() -> Result<()> {
        assert!(NumThreads::AllCpus.is_parallel());
        assert!(NumThreads::Count(3).is_parallel());
        assert_eq!(NumThreads::Count(3).thread_pool()?.current_num_threads(), 3);
        Ok(())
    }
}
