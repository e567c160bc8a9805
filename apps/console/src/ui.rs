use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
}

/// User-facing notification surface shared by all pages.
///
/// `alert` is blocking and modal, `toast` is transient. `confirm` returns
/// the user's answer to a yes/no question.
#[async_trait]
pub trait Ui: Send + Sync {
    async fn alert(&self, message: &str);

    async fn confirm(&self, message: &str) -> bool;

    async fn toast(&self, message: &str, kind: ToastKind);
}
