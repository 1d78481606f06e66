use log::debug;
#[cfg(feature = "multithreading")]
use rayon::prelude::*;

use crate::err::Result;
use crate::model::Message;
use crate::parse::MessageReader;
use crate::tag_names::TagNames;
use crate::xml_reader::read_document;

/// Nesting limit applied when none is configured. Real messages stay well below it.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserSettings {
    /// Maximum element nesting accepted by the reader.
    max_depth: usize,
    /// Worker threads for `parse_many`, `0` lets rayon decide.
    num_threads: usize,
    tag_names: TagNames,
}

impl Default for ParserSettings {
    fn default() -> Self {
        ParserSettings {
            max_depth: DEFAULT_MAX_DEPTH,
            num_threads: 0,
            tag_names: TagNames::default(),
        }
    }
}

impl ParserSettings {
    pub fn new() -> Self {
        ParserSettings::default()
    }

    /// Sets the maximum element nesting. Documents nesting deeper are rejected.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the number of worker threads used by `parse_many`.
    /// `0` will let rayon decide.
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = if cfg!(feature = "multithreading") {
            num_threads
        } else {
            debug!("`num_threads` has no effect without the `multithreading` feature");
            1
        };
        self
    }

    pub fn tag_names(mut self, tag_names: TagNames) -> Self {
        self.tag_names = tag_names;
        self
    }

    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn get_num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn get_tag_names(&self) -> &TagNames {
        &self.tag_names
    }
}

/// Reads IDMEF XML documents into [`Message`]s.
///
/// A parser holds only its settings; each call builds its own element tree, so a
/// single parser can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct IdmefParser {
    settings: ParserSettings,
}

impl IdmefParser {
    pub fn new() -> Self {
        IdmefParser::default()
    }

    pub fn with_tag_names(tag_names: TagNames) -> Self {
        IdmefParser::new().with_configuration(ParserSettings::new().tag_names(tag_names))
    }

    pub fn with_configuration(mut self, configuration: ParserSettings) -> Self {
        self.settings = configuration;
        self
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    /// Parses a single document.
    ///
    /// Fails on malformed or unsafe XML, on a root that is not the configured
    /// message element, and on any value that does not convert.
    pub fn parse(&self, xml: &str) -> Result<Message> {
        let root = read_document(xml, self.settings.max_depth)?;
        let message = MessageReader::new(&self.settings.tag_names).read_message(&root)?;
        debug!(
            "parsed message `{}`",
            message.message_id().unwrap_or("<no messageid>")
        );
        Ok(message)
    }

    /// Parses independent documents, in parallel when the `multithreading` feature is on.
    /// Results keep the input order.
    pub fn parse_many<S>(&self, documents: &[S]) -> Vec<Result<Message>>
    where
        S: AsRef<str> + Sync,
    {
        #[cfg(feature = "multithreading")]
        {
            if self.settings.num_threads != 1 && documents.len() > 1 {
                match rayon::ThreadPoolBuilder::new()
                    .num_threads(self.settings.num_threads)
                    .build()
                {
                    Ok(pool) => {
                        return pool.install(|| {
                            documents
                                .par_iter()
                                .map(|document| self.parse(document.as_ref()))
                                .collect()
                        });
                    }
                    Err(e) => debug!("failed to build a thread pool, parsing sequentially: {}", e),
                }
            }
        }

        documents
            .iter()
            .map(|document| self.parse(document.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::IdmefError;
    use crate::tag_names::Tag;
    use pretty_assertions::assert_eq;

    const HEARTBEAT: &str = r#"<idmef:IDMEF-Message version="1.0" xmlns:idmef="http://iana.org/idmef">
        <idmef:Heartbeat messageid="hb"><idmef:HeartbeatInterval>60</idmef:HeartbeatInterval></idmef:Heartbeat>
    </idmef:IDMEF-Message>"#;

    #[test]
    fn test_settings_builder() {
        let settings = ParserSettings::new().max_depth(8).num_threads(1);
        assert_eq!(settings.get_max_depth(), 8);
        assert_eq!(settings.get_num_threads(), 1);
        assert_eq!(settings.get_tag_names().get(Tag::Alert), "idmef:Alert");
        assert_eq!(ParserSettings::default().get_max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_max_depth_is_applied() {
        let parser = IdmefParser::new().with_configuration(ParserSettings::new().max_depth(2));
        let err = parser.parse(HEARTBEAT).unwrap_err();
        assert!(matches!(err, IdmefError::DepthLimitExceeded { limit: 2 }));

        assert!(IdmefParser::new().parse(HEARTBEAT).is_ok());
    }

    #[test]
    fn test_parse_many_keeps_order() {
        let documents = vec![
            HEARTBEAT.to_owned(),
            "<not-idmef/>".to_owned(),
            HEARTBEAT.replace("hb", "hb-2"),
        ];

        for threads in [1, 0, 4] {
            let parser =
                IdmefParser::new().with_configuration(ParserSettings::new().num_threads(threads));
            let results = parser.parse_many(&documents);
            assert_eq!(results.len(), 3);
            assert_eq!(results[0].as_ref().unwrap().message_id(), Some("hb"));
            assert!(results[1].is_err());
            assert_eq!(results[2].as_ref().unwrap().message_id(), Some("hb-2"));
        }
    }
}
