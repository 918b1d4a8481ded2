//! MessageGateway trait definition.
//!
//! Sends one outbound reply to a chat. The concrete implementation
//! (`MaxGateway` in pitstop-infra) talks to the messenger platform;
//! callers treat delivery as fire-and-forget and only log failures.

use std::sync::Arc;

use pitstop_types::error::GatewayError;
use pitstop_types::wire::Reply;

/// Outbound message delivery port.
pub trait MessageGateway: Send + Sync {
    /// Deliver a reply (text plus optional inline keyboard) to a chat.
    fn send(
        &self,
        chat_id: i64,
        reply: &Reply,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;
}

impl<T: MessageGateway> MessageGateway for Arc<T> {
    fn send(
        &self,
        chat_id: i64,
        reply: &Reply,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send {
        T::send(self, chat_id, reply)
    }
}
