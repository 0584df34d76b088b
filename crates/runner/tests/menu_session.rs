//! Scripted menu session over a dataset file
//!
//! Drives the same loop the `rex` binary runs, feeding selections from a
//! byte slice and capturing everything written.

use std::io::Write;

use rex_exchange::{Exchange, SimulatorConfig};
use rex_runner::Session;
use rust_decimal_macros::dec;

fn dataset() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "2020/03/17 17:01:24.884492,ETH/BTC,ask,0.02187,3").unwrap();
    writeln!(file, "2020/03/17 17:01:24.884492,ETH/BTC,bid,0.0215,2").unwrap();
    writeln!(file, "2020/03/17 17:01:24.884492,DOGE/BTC,ask,0.0000003,5000").unwrap();
    writeln!(file, "2020/03/17 17:01:30.099017,ETH/BTC,bid,0.0218,1").unwrap();
    file.flush().unwrap();
    file
}

fn exchange(file: &tempfile::NamedTempFile) -> Exchange {
    let config = SimulatorConfig {
        dataset: file.path().to_path_buf(),
        ..SimulatorConfig::default()
    };
    Exchange::from_config(&config).unwrap()
}

#[test]
fn test_full_session_script() {
    let file = dataset();
    let script = "\
2
4
ETH/BTC,0.022,1.5
6
5
3
ETH/BTC,0.03,1
6
7
";

    let mut session = Session::new(exchange(&file), script.as_bytes(), Vec::new());
    session.run().unwrap();

    // 1.5 ETH bought at the dataset ask price; the later ask at 0.03 sits
    // above the only bid and never fills
    let wallet = session.exchange().wallet();
    assert_eq!(wallet.balance("ETH"), dec!(1.5));
    assert_eq!(wallet.balance("BTC"), dec!(10) - dec!(0.032805));

    let out = String::from_utf8(session.into_output()).unwrap();
    assert!(out.contains("Product: DOGE/BTC"));
    assert!(out.contains("Product: ETH/BTC"));
    assert!(out.contains("Sale price: 0.02187 amount 1.5"));
    assert!(out.contains("Your wallet has 2 currencies"));
    assert!(out.contains("The current time is: 2020/03/17 17:01:30.099017"));
    assert!(out.contains("End of data reached, starting over."));
}

#[test]
fn test_session_ends_with_input() {
    let file = dataset();
    let mut session = Session::new(exchange(&file), "1\n".as_bytes(), Vec::new());

    session.run().unwrap();

    let out = String::from_utf8(session.into_output()).unwrap();
    assert_eq!(out.matches("Type in 1-7").count(), 2);
}
