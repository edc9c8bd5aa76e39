use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use chain_hash::HashTable;
use chain_hash::hash_table::Entry;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,
}

fn hash_u64(value: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating HashTable with target capacity: {}",
        args.target_capacity
    );

    let mut table: HashTable<u64> = HashTable::with_capacity(args.target_capacity);

    println!("Bucket count: {}", table.capacity());
    println!("Filling table with u64 values...");

    // Insert enough values to sit just under the growth threshold of the
    // starting capacity, so no resize happens mid-demo.
    let num_values = (args.target_capacity * 7 / 10).saturating_sub(1);
    for i in 0..num_values {
        let value = i as u64;
        let hash = hash_u64(value);

        match table.entry(hash, |&v| v == value) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(_) => {
                panic!("Value already exists in table: {}", value);
            }
        }
    }

    println!("Inserted {} values into table", table.len());
    println!("Final load factor: {:.2}%", table.load_factor() * 100.0);

    table.stats().print();

    println!("Chain length histogram:");
    for (length, count) in table.chain_histogram().iter().enumerate() {
        println!("  {:>3} entries: {} buckets", length, count);
    }
}
