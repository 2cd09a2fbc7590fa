extern crate parallel_quicksort;
extern crate rand;

use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use parallel_quicksort::errors::Error;
use parallel_quicksort::numbers;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("parallel-quicksort-numbers-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn write_format() {
    let path = scratch("format.csv");
    numbers::write(&path, &[3, 1, 2]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "3,1,2");

    numbers::write(&path, &[42]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "42");

    numbers::write(&path, &[]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn write_then_read() {
    let path = scratch("generated.csv");
    let mut rng = StdRng::seed_from_u64(11);
    let generated = numbers::generate(1000, &mut rng);

    numbers::write(&path, &generated).unwrap();
    assert_eq!(numbers::read(&path).unwrap(), generated);
}

#[test]
fn read_tolerates_whitespace() {
    let path = scratch("whitespace.csv");
    fs::write(&path, " 5, -3 ,8\n").unwrap();
    assert_eq!(numbers::read(&path).unwrap(), vec![5, -3, 8]);

    fs::write(&path, "").unwrap();
    assert!(numbers::read(&path).unwrap().is_empty());
}

#[test]
fn read_missing() {
    let path = scratch("missing.csv");
    let _ = fs::remove_file(&path);

    match numbers::read(&path) {
        Err(Error::Open { path: p, .. }) => assert_eq!(p, path),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn read_malformed() {
    let path = scratch("malformed.csv");
    fs::write(&path, "1,2,x3,4").unwrap();

    match numbers::read(&path) {
        Err(Error::Malformed { position, token }) => {
            assert_eq!(position, 2);
            assert_eq!(token, "x3");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn write_into_missing_dir() {
    let path = scratch("no-such-dir").join("out.csv");

    match numbers::write(&path, &[1, 2]) {
        Err(Error::Create { .. }) => {}
        other => panic!("unexpected {:?}", other),
    }
}
