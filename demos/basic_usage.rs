use coded_errors::definitions::{internal, io, validation};
use coded_errors::http::HttpStatusMapper;
use coded_errors::{Error, ErrorCode, ResultExt};

fn fetch_profile(host: &str) -> Result<String, Error> {
    // Simulate a refused connection to the profile store
    Err(Error::new(io::NETWORK, "Connection refused.").with("host", host.to_owned()))
}

fn load_user(id: u64) -> Result<String, Error> {
    fetch_profile("db-1")
        .wrap_err(internal::UNEXPECTED, "Could not load user.")
        .with_err_meta("user_id", id as i64)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Basic Usage Example ---\n");

    // 1. Codes compose one segment at a time and match on segment boundaries
    let email = (&validation::REQUIRED / "Email")?;
    println!("1. Composed code: {}", email);
    println!("   depth={} leaf={} parent={:?}", email.depth(), email.leaf(), email.parent());
    println!("   under Validation: {}", email.is_child_of(&validation::ROOT));
    println!(
        "   'ValidationError' under Validation: {}",
        ErrorCode::new("ValidationError")?.is_child_of(&validation::ROOT)
    );

    // 2. Wrapping keeps the root cause; with() never touches the receiver
    let err = match load_user(7) {
        Ok(_) => return Ok(()),
        Err(err) => err,
    };
    let tagged = err.with("attempt", 2);
    println!("\n2. Chain: {}", tagged);
    println!("   root cause: {}", tagged.root_cause().code());
    println!("   original still has {} metadata entries", err.metadata().map_or(0, |m| m.len()));
    println!("   caused by IO: {}", tagged.find(&io::ROOT).is_some());

    // 3. Structured log line, bounded per field
    let mut line = String::new();
    tagged.log_entry().write_to(&mut line)?;
    println!("\n3. [LOG] {}", line);

    // 4. HTTP status by walking up the hierarchy
    let mapper = HttpStatusMapper::new();
    println!("\n4. HTTP statuses:");
    println!("   {} -> {}", email, mapper.status_for(&email));
    println!("   {} -> {}", tagged.code(), mapper.status_for_error(&tagged));
    mapper.register(validation::REQUIRED, 422)?;
    println!("   {} -> {} (custom mapping on its parent)", email, mapper.status_for(&email));

    // 5. JSON round trip keeps the chain and the metadata order
    let json = serde_json::to_string_pretty(&tagged)?;
    println!("\n5. JSON:\n{}", json);
    let back: Error = serde_json::from_str(&json)?;
    println!("   round trip equal: {}", back == tagged);
    println!("   links after decode: {}", back.chain_len());

    Ok(())
}
