use crate::convert::types::VariantRecord;
use crate::error::Result;
use std::io::Write;

/// Writes completed records as tab-separated lines, no header
pub struct VcfWriter<W: Write> {
    writer: W,
    include_hgvs: bool,
}

impl<W: Write> VcfWriter<W> {
    pub fn new(writer: W, include_hgvs: bool) -> Self {
        VcfWriter {
            writer,
            include_hgvs,
        }
    }

    pub fn write_record(&mut self, record: &VariantRecord) -> Result<()> {
        writeln!(self.writer, "{}", record.to_line(self.include_hgvs))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying sink
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vcf_writer() {
        let mut buffer = Vec::new();
        let mut writer = VcfWriter::new(&mut buffer, false);

        let mut record = VariantRecord::new();
        record.chromosome = "7".to_string();
        record.position = "140453136".to_string();
        record.external_id = "rs113488022".to_string();
        record.pathogenicity_calls.push("Pathogenic".to_string());

        writer.write_record(&record).unwrap();
        writer.write_record(&VariantRecord::new()).unwrap();
        writer.flush().unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "7\t140453136\trs113488022\t.\t.\t.\t.\tCLINVAR_PATHOGENICITY=Pathogenic;CLINVAR_REVIEWS=;CLINVAR_PMID="
        );
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_vcf_writer_hgvs() {
        let mut writer = VcfWriter::new(Vec::new(), true);
        writer.write_record(&VariantRecord::new()).unwrap();
        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(output.ends_with(";CLINVAR_HGVS=\n"));
    }
}
