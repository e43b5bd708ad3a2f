use std::io;

use smsc::SmscClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let login = std::env::var("SMSC_LOGIN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSC_LOGIN environment variable is required",
        )
    })?;
    let password = std::env::var("SMSC_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSC_PASSWORD environment variable is required",
        )
    })?;

    let client = SmscClient::new("", login, password, "");
    let balance = client.balance()?;
    println!("balance: {}, currency: {:?}", balance.amount, balance.currency);

    Ok(())
}
