//! Flag-and-collect upload of dirty instance buffers

use super::InstancePool;

/// Bytes of one pool that must be re-uploaded this frame
#[derive(Debug, Clone, Copy)]
pub struct UploadBatch<'a> {
    /// Pool name
    pub name: &'a str,
    /// Number of active instances in `bytes`
    pub instance_count: usize,
    /// Active slot data
    pub bytes: &'a [u8],
}

/// Gather every dirty pool and clear its flag
///
/// Visible pools come first so a renderer can stop at the first empty batch.
pub fn collect_uploads<'a, I>(pools: I) -> Vec<UploadBatch<'a>>
where
    I: IntoIterator<Item = &'a mut InstancePool>,
{
    let mut batches = Vec::new();
    for pool in pools {
        if !pool.take_dirty() {
            continue;
        }
        let pool: &'a InstancePool = pool;
        batches.push(UploadBatch {
            name: pool.name(),
            instance_count: pool.active_count(),
            bytes: pool.as_bytes(),
        });
    }
    batches.sort_by_key(|batch| batch.instance_count == 0);
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4;

    #[test]
    fn test_collects_only_dirty_pools() {
        let mut a = InstancePool::new("A", 2);
        let mut b = InstancePool::new("B", 2);
        a.push(&Mat4::identity());

        let batches = collect_uploads([&mut a, &mut b]);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].name, "A");
        assert_eq!(batches[0].instance_count, 1);
        assert_eq!(batches[0].bytes.len(), 64);

        assert!(collect_uploads([&mut a, &mut b]).is_empty());
    }
}
