use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::StagedFile;

/// A revocable, renderable reference to the staged file's bytes.
///
/// Clones share one revocation flag: once the manager releases the handle,
/// every clone held by a renderer reads back as empty. Renderers must treat
/// `bytes() == None` as "no preview" rather than holding the last bytes.
#[derive(Debug, Clone)]
pub struct PreviewHandle {
    inner: Arc<PreviewInner>,
}

#[derive(Debug)]
struct PreviewInner {
    id: u64,
    media_type: String,
    bytes: Arc<[u8]>,
    revoked: AtomicBool,
}

impl PreviewHandle {
    fn new(id: u64, file: &StagedFile) -> Self {
        Self {
            inner: Arc::new(PreviewInner {
                id,
                media_type: file.media_type.clone(),
                bytes: Arc::clone(&file.bytes),
                revoked: AtomicBool::new(false),
            }),
        }
    }

    /// The bytes to render, or `None` once the handle has been revoked.
    pub fn bytes(&self) -> Option<Arc<[u8]>> {
        if self.is_revoked() {
            None
        } else {
            Some(Arc::clone(&self.inner.bytes))
        }
    }

    /// Declared media type of the previewed file (image family or PDF).
    pub fn media_type(&self) -> &str {
        &self.inner.media_type
    }

    pub fn is_revoked(&self) -> bool {
        self.inner.revoked.load(Ordering::Acquire)
    }

    fn revoke(&self) {
        self.inner.revoked.store(true, Ordering::Release);
    }
}

impl PartialEq for PreviewHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id && self.is_revoked() == other.is_revoked()
    }
}

impl Eq for PreviewHandle {}

/// Single owner of the current preview handle.
///
/// Invariant: at most one live handle at a time; `bind` revokes the previous
/// handle before constructing the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewManager {
    current: Option<PreviewHandle>,
    next_id: u64,
}

impl PreviewManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a fresh handle over `file`, revoking whatever was bound before.
    pub fn bind(&mut self, file: &StagedFile) -> PreviewHandle {
        self.release();
        self.next_id += 1;
        let handle = PreviewHandle::new(self.next_id, file);
        self.current = Some(handle.clone());
        handle
    }

    /// Revoke the current handle. Idempotent; safe with nothing bound.
    pub fn release(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.revoke();
        }
    }

    pub fn current(&self) -> Option<&PreviewHandle> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::PreviewManager;
    use crate::{CandidateFile, StagedFile};

    fn staged(name: &str) -> StagedFile {
        StagedFile::from_candidate(CandidateFile::new(name, "image/png", vec![1, 2, 3]))
    }

    #[test]
    fn bind_revokes_previous_handle() {
        let mut manager = PreviewManager::new();
        let first = manager.bind(&staged("a.png"));
        let second = manager.bind(&staged("b.png"));

        assert!(first.is_revoked());
        assert!(first.bytes().is_none());
        assert!(!second.is_revoked());
        assert_eq!(second.bytes().unwrap().as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn release_is_idempotent() {
        let mut manager = PreviewManager::new();
        let handle = manager.bind(&staged("a.png"));

        manager.release();
        manager.release();
        assert!(handle.is_revoked());

        // A later bind is unaffected by the double release.
        let next = manager.bind(&staged("b.png"));
        assert!(!next.is_revoked());
    }

    #[test]
    fn release_with_nothing_bound_is_a_noop() {
        let mut manager = PreviewManager::new();
        manager.release();
        assert!(manager.current().is_none());
    }

    #[test]
    fn clones_share_revocation() {
        let mut manager = PreviewManager::new();
        let handle = manager.bind(&staged("a.png"));
        let renderer_copy = handle.clone();

        manager.release();
        assert!(renderer_copy.is_revoked());
        assert!(renderer_copy.bytes().is_none());
    }
}
