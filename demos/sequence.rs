//! End-to-end exercise of the file operations against a live account.
//!
//! Creates /testdir, uploads a 1 MiB random payload, verifies full and
//! partial downloads byte-for-byte, demonstrates non-overwrite renaming,
//! copy and move, then deletes the folder again.

mod common;

use rand::RngCore;

use dropboxlib::{DropboxError, ErrorCode, GetRequest, Result, UploadRequest};

const TEST_DIR: &str = "/testdir";
const SIZE: usize = 1 << 20;

#[tokio::main]
async fn main() -> Result<()> {
    common::init_tracing();

    let client = common::client_from_env();
    common::login(&client).await?;

    match client.create_folder(TEST_DIR).await {
        Ok(md) => println!("Created {} (is_dir={})", md.path, md.is_dir),
        Err(DropboxError::ApiError {
            code: ErrorCode::Conflict,
            ..
        }) => println!("{} already exists, reusing it", TEST_DIR),
        Err(e) => return Err(e),
    }

    let mut payload = vec![0u8; SIZE];
    rand::thread_rng().fill_bytes(&mut payload);

    let file_path = format!("{}/testfile", TEST_DIR);
    let md = client
        .upload_file(&UploadRequest::new(&file_path, payload.clone()))
        .await?;
    println!("Uploaded {} ({} bytes)", md.path, md.size_bytes);
    assert_eq!(md.size_bytes as usize, SIZE);

    // Full fetch round trip
    let full = client.get_file(&GetRequest::new(&file_path)).await?;
    assert_eq!(full.code(), ErrorCode::Success);
    assert_eq!(full.data_len(), SIZE);
    assert_eq!(full.data(), payload.as_slice());
    println!("Full fetch verified ({} bytes)", full.data_len());

    // Partial fetch
    let (offset, length) = (1177u64, 6656u64);
    let partial = client
        .get_file(&GetRequest::new(&file_path).with_range(offset, length))
        .await?;
    assert_eq!(partial.code(), ErrorCode::PartialContent);
    assert_eq!(partial.data_len() as u64, length);
    assert_eq!(
        partial.data(),
        &payload[offset as usize..(offset + length) as usize]
    );
    println!("Partial fetch verified ({} bytes at {})", length, offset);

    // Non-overwrite upload gets auto-renamed
    let renamed = client
        .upload_file(&UploadRequest::new(&file_path, payload.clone()).with_overwrite(false))
        .await?;
    assert_ne!(renamed.path, file_path);
    println!("Non-overwrite upload stored as {}", renamed.path);

    // Copy and move preserve size and kind
    let copy_path = format!("{}.bk", file_path);
    let copied = client.copy_file(&file_path, &copy_path).await?;
    assert_eq!(copied.path, copy_path);
    assert_eq!(copied.size_bytes, md.size_bytes);
    println!("Copied to {}", copied.path);

    let move_path = format!("{}.bk2", file_path);
    let moved = client.move_file(&copy_path, &move_path).await?;
    assert_eq!(moved.path, move_path);
    assert_eq!(moved.size_bytes, md.size_bytes);
    println!("Moved copy to {}", moved.path);

    // The moved-away source is gone
    match client.get_file(&GetRequest::new(&copy_path)).await {
        Err(DropboxError::ApiError {
            code: ErrorCode::NotFound,
            ..
        }) => println!("{} no longer exists, as expected", copy_path),
        other => println!("unexpected result fetching moved source: {:?}", other.map(|r| r.code())),
    }

    // Listing
    let listing = client.metadata(TEST_DIR, true).await?;
    println!("{} now holds {} entries:", TEST_DIR, listing.contents.len());
    for entry in &listing.contents {
        println!("  {} ({} bytes)", entry.path, entry.size_bytes);
    }

    // Cleanup
    let deleted = client.delete_file(TEST_DIR).await?;
    assert!(deleted.is_deleted);
    assert!(deleted.is_dir);
    println!("Deleted {}", deleted.path);

    Ok(())
}
