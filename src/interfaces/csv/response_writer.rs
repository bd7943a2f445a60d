use crate::domain::response::TokenizationResponse;
use crate::error::TokenizeError;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ResponseRow<'a> {
    caller: &'a str,
    success: bool,
    bin_short: &'a str,
    bin_long: &'a str,
    brand: &'a str,
    bank: &'a str,
    #[serde(rename = "type")]
    card_type: &'a str,
    last4: &'a str,
    error: &'a str,
}

/// Writes one CSV row per processed request.
///
/// Failed requests carry the error code and leave the card columns empty.
pub struct ResponseWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_result(
        &mut self,
        caller: &str,
        result: &Result<TokenizationResponse, TokenizeError>,
    ) -> csv::Result<()> {
        let row = match result {
            Ok(response) => {
                let info = &response.card_info;
                ResponseRow {
                    caller,
                    success: response.success,
                    bin_short: &info.bin_short,
                    bin_long: &info.bin_long,
                    brand: &info.brand,
                    bank: &info.bank,
                    card_type: &info.card_type,
                    last4: &info.last4,
                    error: "",
                }
            }
            Err(e) => ResponseRow {
                caller,
                success: false,
                bin_short: "",
                bin_long: "",
                brand: "",
                bank: "",
                card_type: "",
                last4: "",
                error: e.code(),
            },
        };
        self.writer.serialize(row)
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::response::CardInfo;

    #[test]
    fn test_writes_success_and_failure_rows() {
        let mut buf = Vec::new();
        {
            let mut writer = ResponseWriter::new(&mut buf);
            let ok = Ok(TokenizationResponse {
                success: true,
                token: None,
                card_info: CardInfo {
                    bin_short: "411111".into(),
                    bin_long: "41111111".into(),
                    brand: "VISA".into(),
                    bank: "Bank X".into(),
                    card_type: "credit".into(),
                    last4: "1111".into(),
                },
            });
            writer.write_result("u-1", &ok).unwrap();
            writer
                .write_result("u-2", &Err(TokenizeError::UserDisabled))
                .unwrap();
            writer.flush().unwrap();
        }

        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "caller,success,bin_short,bin_long,brand,bank,type,last4,error");
        assert_eq!(lines[1], "u-1,true,411111,41111111,VISA,Bank X,credit,1111,");
        assert_eq!(lines[2], "u-2,false,,,,,,,user-disabled");
    }
}
