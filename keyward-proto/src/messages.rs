//! Typed request/response messages over the frame primitives.

use crate::error::ProtoResult;
use crate::frame::{self, DENIAL_SENTINEL, MAX_BLOB_LEN};
use crate::payload;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// A client's request to have a wrapped content key unwrapped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoveryRequest {
    /// Registered identity name claiming the request.
    pub identity: String,
    /// Content key wrapped under the master public key.
    pub wrapped_key: Vec<u8>,
    /// Signature over [`RecoveryRequest::signed_payload`] by the identity's
    /// private key.
    pub signature: Vec<u8>,
}

impl RecoveryRequest {
    /// Writes the framed request and flushes.
    pub async fn write_to<W>(&self, writer: &mut W) -> ProtoResult<()>
    where
        W: AsyncWrite + Unpin,
    {
        frame::write_ident(writer, &self.identity).await?;
        frame::write_blob(writer, &self.wrapped_key).await?;
        frame::write_blob(writer, &self.signature).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Reads a framed request.
    pub async fn read_from<R>(reader: &mut R) -> ProtoResult<Self>
    where
        R: AsyncRead + Unpin,
    {
        let identity = frame::read_ident(reader).await?;
        let wrapped_key = frame::read_blob(reader).await?;
        let signature = frame::read_blob(reader).await?;
        Ok(Self {
            identity,
            wrapped_key,
            signature,
        })
    }

    /// The canonical byte sequence this request's signature covers.
    pub fn signed_payload(&self) -> Vec<u8> {
        payload::signed_payload(&self.identity, &self.wrapped_key)
    }
}

/// The server's answer to a [`RecoveryRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecoveryResponse {
    /// Recovered content key bytes.
    Key(Vec<u8>),
    /// Denial sentinel. Deliberately carries no reason; the wire never
    /// distinguishes a bad signature from an unknown identity or an unwrap
    /// failure.
    Denied,
}

impl RecoveryResponse {
    /// Writes the framed response and flushes.
    pub async fn write_to<W>(&self, writer: &mut W) -> ProtoResult<()>
    where
        W: AsyncWrite + Unpin,
    {
        match self {
            Self::Key(key) => frame::write_blob(writer, key).await?,
            Self::Denied => writer.write_i32(DENIAL_SENTINEL).await?,
        }
        writer.flush().await?;
        Ok(())
    }

    /// Reads a framed response. Any negative length is a denial.
    pub async fn read_from<R>(reader: &mut R) -> ProtoResult<Self>
    where
        R: AsyncRead + Unpin,
    {
        let len = reader.read_i32().await?;
        if len < 0 {
            return Ok(Self::Denied);
        }
        let len = len as usize;
        if len > MAX_BLOB_LEN {
            return Err(crate::error::ProtoError::Frame(format!(
                "response length {len} exceeds {MAX_BLOB_LEN} byte cap"
            )));
        }
        let mut key = vec![0u8; len];
        reader.read_exact(&mut key).await?;
        Ok(Self::Key(key))
    }
}
