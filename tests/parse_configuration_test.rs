use std::path::Path;

use fermifab::fermi::FermiMap;
use fermifab::parse::configuration::parse_configuration;

#[test]
fn test_parse_two_blocks() {
    let fp = Path::new("tests/configurations/test_parse_two_blocks.csv");
    let config = parse_configuration(fp).unwrap();
    assert_eq!(config.orbitals(), vec![3, 4]);
    assert_eq!(config.particles(), vec![1, 2]);
    assert_eq!(config.dimension().unwrap(), 18);
    let map = FermiMap::build(&config).unwrap();
    assert_eq!(map.len(), 18);
    assert_eq!(map.get(0), Some(0b1_1001));
}

#[test]
fn test_int_parse_error() {
    let fp = Path::new("tests/configurations/test_int_parse_error.csv");
    match parse_configuration(fp) {
        Ok(_) => panic!("Should have errored."),
        Err(_) => println!("Error as expected."),
    }
}

#[test]
fn test_header_error() {
    let fp = Path::new("tests/configurations/test_header_error.csv");
    match parse_configuration(fp) {
        Ok(_) => panic!("Should have errored."),
        Err(e) => assert!(e.to_string().contains("orbitals,particles")),
    }
}

#[test]
fn test_invalid_block() {
    let fp = Path::new("tests/configurations/test_invalid_block.csv");
    match parse_configuration(fp) {
        Ok(_) => panic!("Should have errored."),
        Err(e) => assert!(e.to_string().contains("block 0")),
    }
}

#[test]
fn test_empty_configuration() {
    let fp = Path::new("tests/configurations/test_empty.csv");
    assert!(parse_configuration(fp).is_err());
}

#[test]
fn test_missing_file() {
    let fp = Path::new("tests/configurations/does_not_exist.csv");
    assert!(parse_configuration(fp).is_err());
}
