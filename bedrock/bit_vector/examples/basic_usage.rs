use bit_vector::{BitVector, BitVectorError, GrowthPolicy};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Bit Vector Examples ===\n");

    // Example 1: Variable-width integer stream
    let _ = example_code_stream();

    // Example 2: Flags addressed by index
    let _ = example_flags();

    // Example 3: Saving and restoring
    let _ = example_persistence();
}

fn example_code_stream() -> Result<(), BitVectorError> {
    println!("Example 1: Storing 5-bit palette codes");

    let mut codes = BitVector::with_growth(0, GrowthPolicy::Exact);

    // Palette indices (0-31)
    for code in [15, 8, 23, 31] {
        codes.append(code, 5)?;
    }

    println!("  Stored {} bits in {} words", codes.size(), codes.dump().len());
    for i in 0..4 {
        println!("  Code {}: {}", i, codes.fetch(i * 5, 5)?);
    }
    println!("  Bits: {}", codes);
    println!();

    Ok(())
}

fn example_flags() -> Result<(), BitVectorError> {
    println!("Example 2: Feature flags for 200 users");

    let mut flags = BitVector::new(200);
    for user in (0..200).step_by(7) {
        flags.set(user, true)?;
    }

    let enabled = (0..flags.capacity())
        .filter(|&i| flags.get(i).unwrap_or(false))
        .count();
    println!("  Capacity: {} bits", flags.capacity());
    println!("  Enabled:  {} users", enabled);

    match flags.get(1000) {
        Err(e) => println!("  Out of range lookup: {}", e),
        Ok(_) => println!("  Unexpected hit"),
    }
    println!();

    Ok(())
}

fn example_persistence() -> Result<(), BitVectorError> {
    println!("Example 3: Write and read back");

    let original = BitVector::from_bytes(b"packed!");
    let mut buf = Vec::new();
    original.write(&mut buf)?;

    let mut restored = BitVector::default();
    restored.read(buf.as_slice())?;

    println!("  Encoded size: {} bytes", buf.len());
    println!("  Round trip equal: {}", restored == original);

    Ok(())
}
