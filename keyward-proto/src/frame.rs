//! Big-endian frame primitives.

use crate::error::{ProtoError, ProtoResult};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Length value the server sends in place of a key to deny recovery.
pub const DENIAL_SENTINEL: i32 = -1;

/// Upper bound on inbound blob lengths.
///
/// The protocol itself carries no limit; without one a hostile length field
/// forces an arbitrary allocation before any crypto runs. Honest frames are
/// tiny (an RSA-4096 wrapped key or signature is 512 bytes).
pub const MAX_BLOB_LEN: usize = 1024 * 1024;

/// Writes a length-prefixed identity string (u16 length + UTF-8 bytes).
pub async fn write_ident<W>(writer: &mut W, identity: &str) -> ProtoResult<()>
where
    W: AsyncWrite + Unpin,
{
    let bytes = identity.as_bytes();
    let len = u16::try_from(bytes.len())
        .map_err(|_| ProtoError::Frame(format!("identity too long: {} bytes", bytes.len())))?;
    writer.write_u16(len).await?;
    writer.write_all(bytes).await?;
    Ok(())
}

/// Reads a length-prefixed identity string.
pub async fn read_ident<R>(reader: &mut R) -> ProtoResult<String>
where
    R: AsyncRead + Unpin,
{
    let len = reader.read_u16().await? as usize;
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await?;
    String::from_utf8(buf).map_err(|_| ProtoError::IdentityEncoding)
}

/// Writes a length-prefixed blob (i32 length + bytes).
pub async fn write_blob<W>(writer: &mut W, blob: &[u8]) -> ProtoResult<()>
where
    W: AsyncWrite + Unpin,
{
    let len = i32::try_from(blob.len())
        .map_err(|_| ProtoError::Frame(format!("blob too long: {} bytes", blob.len())))?;
    writer.write_i32(len).await?;
    writer.write_all(blob).await?;
    Ok(())
}

/// Reads a length-prefixed blob, rejecting negative or oversized lengths.
pub async fn read_blob<R>(reader: &mut R) -> ProtoResult<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let len = reader.read_i32().await?;
    if len < 0 {
        return Err(ProtoError::Frame(format!("negative blob length {len}")));
    }
    let len = len as usize;
    if len > MAX_BLOB_LEN {
        return Err(ProtoError::Frame(format!(
            "blob length {len} exceeds {MAX_BLOB_LEN} byte cap"
        )));
    }
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await?;
    Ok(buf)
}
