use log::trace;

use crate::err::{IdmefError, Result, ValueError};
use crate::model::xml::XmlElement;
use crate::model::{
    Action, Alert, AlertIdent, AlertKind, Assessment, Classification, Confidence,
    CorrelationAlert, Impact, OverflowAlert, Reference, ToolAlert,
};
use crate::tag_names::Tag;
use crate::utils::decode_buffer;

use super::{MessageReader, attr_keyword, attr_string, text_int};

impl MessageReader<'_> {
    pub(super) fn read_alert(&self, element: &XmlElement) -> Result<Alert> {
        trace!("reading alert");
        let mut alert = Alert {
            message_id: attr_string(element, "messageid"),
            ..Default::default()
        };
        let mut subtype: Option<(&XmlElement, AlertKind)> = None;

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Analyzer => alert.analyzer = self.read_analyzer(child)?,
                Tag::CreateTime => alert.create_time = self.read_time(child)?,
                Tag::Classification => alert.classification = self.read_classification(child)?,
                Tag::DetectTime => alert.detect_time = Some(self.read_time(child)?),
                Tag::AnalyzerTime => alert.analyzer_time = Some(self.read_time(child)?),
                Tag::Source => alert.sources.push(self.read_source(child)?),
                Tag::Target => alert.targets.push(self.read_target(child)?),
                Tag::Assessment => alert.assessment = Some(self.read_assessment(child)?),
                Tag::AdditionalData => alert
                    .additional_data
                    .push(self.read_additional_data(child)?),
                Tag::ToolAlert | Tag::OverflowAlert | Tag::CorrelationAlert => {
                    if let Some((first, _)) = &subtype {
                        return Err(IdmefError::MultipleAlertSubtypes {
                            first: first.name.clone(),
                            second: child.name.clone(),
                        });
                    }
                    let kind = match tag {
                        Tag::ToolAlert => AlertKind::Tool(self.read_tool_alert(child)?),
                        Tag::OverflowAlert => {
                            AlertKind::Overflow(self.read_overflow_alert(child)?)
                        }
                        _ => AlertKind::Correlation(self.read_correlation_alert(child)?),
                    };
                    subtype = Some((child, kind));
                }
                _ => self.ignore(element, child),
            }
        }

        Ok(match subtype {
            Some((_, kind)) => alert.into_kind(kind),
            None => alert,
        })
    }

    fn read_classification(&self, element: &XmlElement) -> Result<Classification> {
        let mut classification = Classification {
            ident: attr_string(element, "ident"),
            text: attr_string(element, "text"),
            ..Default::default()
        };

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Reference => classification.references.push(self.read_reference(child)?),
                _ => self.ignore(element, child),
            }
        }

        Ok(classification)
    }

    fn read_reference(&self, element: &XmlElement) -> Result<Reference> {
        let mut reference = Reference {
            origin: attr_keyword(element, "origin")?,
            meaning: attr_string(element, "meaning"),
            ..Default::default()
        };

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Name => reference.name = child.text().unwrap_or_default(),
                Tag::Url => reference.url = child.text().unwrap_or_default(),
                _ => self.ignore(element, child),
            }
        }

        Ok(reference)
    }

    fn read_assessment(&self, element: &XmlElement) -> Result<Assessment> {
        let mut assessment = Assessment::default();

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Impact => assessment.impact = Some(read_impact(child)?),
                Tag::Action => assessment.actions.push(read_action(child)?),
                Tag::Confidence => assessment.confidence = Some(read_confidence(child)?),
                _ => self.ignore(element, child),
            }
        }

        Ok(assessment)
    }

    fn read_tool_alert(&self, element: &XmlElement) -> Result<ToolAlert> {
        let mut tool = ToolAlert::default();

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Name => tool.name = child.text().unwrap_or_default(),
                Tag::Command => tool.command = child.text(),
                Tag::AlertIdent => tool.alert_idents.extend(read_alert_ident(child)),
                _ => self.ignore(element, child),
            }
        }

        Ok(tool)
    }

    fn read_overflow_alert(&self, element: &XmlElement) -> Result<OverflowAlert> {
        let mut overflow = OverflowAlert::default();

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Program => overflow.program = child.text().unwrap_or_default(),
                Tag::Size => overflow.size = text_int(child)?,
                Tag::Buffer => {
                    if let Some(text) = child.text() {
                        overflow.buffer = decode_buffer(&text)
                            .map_err(|e| IdmefError::value(child.name.clone(), e))?;
                    }
                }
                _ => self.ignore(element, child),
            }
        }

        Ok(overflow)
    }

    fn read_correlation_alert(&self, element: &XmlElement) -> Result<CorrelationAlert> {
        let mut correlation = CorrelationAlert::default();

        for (tag, child) in self.children(element) {
            match tag {
                Tag::Name => correlation.name = child.text().unwrap_or_default(),
                Tag::AlertIdent => correlation.alert_idents.extend(read_alert_ident(child)),
                _ => self.ignore(element, child),
            }
        }

        Ok(correlation)
    }
}

/// An empty `alertident` carries nothing and is skipped.
fn read_alert_ident(element: &XmlElement) -> Option<AlertIdent> {
    Some(AlertIdent {
        analyzer_id: attr_string(element, "analyzerid"),
        ident: element.text()?,
    })
}

fn read_impact(element: &XmlElement) -> Result<Impact> {
    Ok(Impact {
        severity: attr_keyword(element, "severity")?,
        completion: attr_keyword(element, "completion")?,
        impact_type: attr_keyword(element, "type")?,
        description: element.text(),
    })
}

fn read_action(element: &XmlElement) -> Result<Action> {
    Ok(Action {
        category: attr_keyword(element, "category")?,
        description: element.text(),
    })
}

fn read_confidence(element: &XmlElement) -> Result<Confidence> {
    let value = element
        .text()
        .map(|text| {
            text.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or(ValueError::InvalidReal { value: text })
        })
        .transpose()
        .map_err(|e| IdmefError::value(element.name.clone(), e))?;

    Ok(Confidence {
        rating: attr_keyword(element, "rating")?,
        value,
    })
}
