use std::{error::Error, time::Instant};

use clap::{Args, Parser, Subcommand};
use poseidon_bn254::{
    Felt,
    abi::{Abi, InputPolicy, Uint256},
    merkle::MerkleTree,
    utils::{parse_word, word_to_hex},
    verifier::RecordingVerifier,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Poseidon hashing and Merkle path verification over the BN254 scalar field.
///
/// Numbers are accepted in decimal or as `0x`-prefixed hex.
#[derive(Parser, Debug)]
#[clap(name = "poseidon-bn254", version)]
struct Cli {
    /// Reject inputs which are not smaller than the field modulus instead of reducing them
    #[clap(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Hash two field elements
    Hash(HashArgs),
    /// Hash random pairs as a batch and report the throughput
    Batch(BatchArgs),
    /// Verify a Merkle path
    Verify(VerifyArgs),
    /// Compute a chain of dependent hashes and report the elapsed time
    Bench(BenchArgs),
    /// Build a tree over the leaves 1..=N and open one of them
    Tree(TreeArgs),
}

#[derive(Args, Debug)]
struct HashArgs {
    #[clap(value_parser = parse_word)]
    a: Uint256,
    #[clap(value_parser = parse_word)]
    b: Uint256,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Number of pairs to hash
    #[clap(short, long, default_value = "1024")]
    count: usize,
    /// Seed of the random pairs
    #[clap(short, long, default_value = "0")]
    seed: u64,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    #[clap(long, value_parser = parse_word)]
    root: Uint256,
    #[clap(long, value_parser = parse_word)]
    leaf: Uint256,
    /// Sibling at the next level, starting at the leaf; may be repeated
    #[clap(long = "sibling", value_parser = parse_word)]
    siblings: Vec<Uint256>,
    /// Whether the current node is the right child at the next level; may be repeated
    #[clap(long = "right")]
    flags: Vec<bool>,
}

#[derive(Args, Debug)]
struct BenchArgs {
    #[clap(short, long, default_value = "1000")]
    iterations: u32,
    #[clap(long, default_value = "1", value_parser = parse_word)]
    seed_a: Uint256,
    #[clap(long, default_value = "2", value_parser = parse_word)]
    seed_b: Uint256,
}

#[derive(Args, Debug)]
struct TreeArgs {
    /// Number of leaves
    #[clap(short, long, default_value = "8")]
    leaves: u64,
    /// Index of the leaf to open
    #[clap(short, long, default_value = "0")]
    index: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false).with_filter(EnvFilter::from_default_env()))
        .init();

    let cli = Cli::parse();
    let policy = if cli.strict { InputPolicy::Reject } else { InputPolicy::Reduce };
    let abi = Abi::new(policy);

    match cli.command {
        Commands::Hash(args) => hash(&abi, args),
        Commands::Batch(args) => batch(&abi, args),
        Commands::Verify(args) => verify(&abi, args),
        Commands::Bench(args) => bench(&abi, args),
        Commands::Tree(args) => tree(args),
    }
}

fn hash(abi: &Abi, args: HashArgs) -> Result<(), Box<dyn Error>> {
    let digest = abi.poseidon_hash(&args.a, &args.b)?;
    println!("{}", word_to_hex(&digest));
    Ok(())
}

fn batch(abi: &Abi, args: BatchArgs) -> Result<(), Box<dyn Error>> {
    let mut rng = ChaCha20Rng::seed_from_u64(args.seed);
    let (a, b): (Vec<Uint256>, Vec<Uint256>) = (0..args.count)
        .map(|_| (rng.random::<Felt>().to_be_bytes(), rng.random::<Felt>().to_be_bytes()))
        .unzip();

    let now = Instant::now();
    let digests = abi.batch_poseidon(&a, &b)?;
    let elapsed = now.elapsed();

    let per_second = digests.len() as f64 / elapsed.as_secs_f64();
    info!(count = digests.len(), ?elapsed, "batch hashed");
    println!(
        "hashed {} pairs in {:.3} ms ({per_second:.0} hashes/s)",
        digests.len(),
        elapsed.as_secs_f64() * 1000.0
    );
    if let Some(last) = digests.last() {
        println!("last digest: {}", word_to_hex(last));
    }
    Ok(())
}

fn verify(abi: &Abi, args: VerifyArgs) -> Result<(), Box<dyn Error>> {
    let valid = abi.verify_merkle_path(&args.root, &args.leaf, &args.siblings, &args.flags)?;
    info!(depth = args.siblings.len(), valid, "merkle path checked");
    println!("{valid}");
    Ok(())
}

fn bench(abi: &Abi, args: BenchArgs) -> Result<(), Box<dyn Error>> {
    let now = Instant::now();
    let digest = abi.benchmark_hash(args.iterations, &args.seed_a, &args.seed_b)?;
    let elapsed = now.elapsed();

    info!(iterations = args.iterations, ?elapsed, "hash chain computed");
    println!("{}", word_to_hex(&digest));
    println!(
        "{} iterations in {:.3} ms ({:.3} us per hash)",
        args.iterations.max(1),
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64() * 1e6 / f64::from(args.iterations.max(1))
    );
    Ok(())
}

fn tree(args: TreeArgs) -> Result<(), Box<dyn Error>> {
    let leaves: Vec<Felt> = (1..=args.leaves).map(Felt::from_u64).collect();

    let now = Instant::now();
    let tree = MerkleTree::new(&leaves)?;
    let elapsed = now.elapsed();
    info!(num_leaves = tree.num_leaves(), depth = tree.depth(), ?elapsed, "tree built");

    let leaf = tree.get_leaf(args.index)?;
    let proof = tree.open(args.index)?;
    println!("root: {}", tree.root());
    println!("leaf: {leaf}");
    for (level, node) in proof.iter().enumerate() {
        let side = if node.is_right { "right" } else { "left" };
        println!("level {level}: sibling {} (current is {side})", node.sibling);
    }

    let (siblings, flags) = proof.into_parts();
    let mut verifier = RecordingVerifier::new();
    let valid = verifier.verify_merkle_path(tree.root(), leaf, &siblings, &flags)?;
    println!("verified: {valid}");
    Ok(())
}
