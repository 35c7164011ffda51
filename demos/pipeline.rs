use kn_adjust::{
    suffix_cmp, AdjustConfig, AdjustCounts, ChainConfig, ChainPosition, Drain, WordIndex, BOS, EOS,
};
use ahash::AHashMap as HashMap;
use std::env;
use std::fs;
use std::thread;

/// Runs the adjustment stage as one thread of a small pipeline: a producer
/// feeds suffix-sorted counts, the stage runs on its own thread, and one
/// consumer per order drains the output.
///
/// Usage: cargo run --example pipeline [order] [text file]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let order: usize = match args.get(1) {
        Some(arg) => arg.parse()?,
        None => 3,
    };
    if order == 0 {
        return Err("order must be at least 1".into());
    }
    let text = match args.get(2) {
        Some(path) => fs::read_to_string(path)?,
        None => "the cat sat on the mat\nthe dog sat on the log\na cat saw the dog\n".to_owned(),
    };

    // Vocabulary assignment; ids below 3 are reserved.
    let mut vocab: HashMap<&str, WordIndex> = HashMap::default();
    let mut names = vec!["<unk>", "<s>", "</s>"];
    let sentences: Vec<Vec<WordIndex>> = text
        .lines()
        .map(|line| {
            line.split_whitespace()
                .map(|w| {
                    *vocab.entry(w).or_insert_with(|| {
                        names.push(w);
                        (names.len() - 1) as WordIndex
                    })
                })
                .collect()
        })
        .collect();

    // Counting and sorting stand in for the upstream stages.
    let mut counts: HashMap<Vec<WordIndex>, u64> = HashMap::default();
    for sentence in &sentences {
        let mut padded = vec![BOS; order - 1];
        padded.extend_from_slice(sentence);
        padded.push(EOS);
        for window in padded.windows(order) {
            *counts.entry(window.to_vec()).or_insert(0) += 1;
        }
    }
    let mut records: Vec<_> = counts.into_iter().collect();
    records.sort_by(|a, b| suffix_cmp(&a.0, &b.0));

    let config = AdjustConfig {
        chain: ChainConfig {
            block_records: 4,
            queue_depth: Some(2),
        },
        ..AdjustConfig::default()
    };

    let mut positions = Vec::new();
    let mut drains = Vec::new();
    for o in 1..order {
        let (position, drain) = ChainPosition::placeholders(o, &config.chain);
        positions.push(position);
        drains.push(drain);
    }
    let (mut feeder, position, drain) = ChainPosition::fed(order, &config.chain);
    positions.push(position);
    drains.push(drain);

    let producer = thread::spawn(move || -> Result<(), kn_adjust::AdjustError> {
        for (words, count) in &records {
            feeder.push(words, *count)?;
        }
        feeder.finish()
    });
    let stage = thread::spawn(move || AdjustCounts::new(config).run(positions));
    let consumers: Vec<_> = drains
        .into_iter()
        .map(|drain: Drain| thread::spawn(move || (drain.order(), drain.into_records())))
        .collect();

    for consumer in consumers {
        let (o, records) = consumer.join().map_err(|_| "consumer panicked")?;
        println!("\n=== order {} ({} records) ===", o, records.len());
        for (words, count) in records {
            let text: Vec<&str> = words.iter().map(|&w| names[w as usize]).collect();
            println!("{}\t{}", text.join(" "), count);
        }
    }
    producer.join().map_err(|_| "producer panicked")??;
    let stats = stage.join().map_err(|_| "stage panicked")??;

    println!("\n=== Statistics ===");
    for (i, (count, discount)) in stats.counts.iter().zip(&stats.discounts).enumerate() {
        println!("order {}: {} distinct, discounts {:?}", i + 1, count, discount.amount);
    }
    Ok(())
}
