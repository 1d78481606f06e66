use log::trace;

use crate::err::Result;
use crate::model::xml::XmlElement;
use crate::model::{
    Alert, AlertIdent, AlertKind, Assessment, Classification, CorrelationAlert, OverflowAlert,
    Reference, ToolAlert,
};
use crate::tag_names::Tag;
use crate::utils::encode_buffer;

use super::{MessageWriter, set_attr, set_keyword};

impl MessageWriter<'_> {
    pub(super) fn write_alert(&self, alert: &Alert) -> Result<XmlElement> {
        trace!("writing alert");
        let mut element = self.element(Tag::Alert);
        set_attr(&mut element, "messageid", alert.message_id.as_deref());

        element.push_element(self.write_analyzer(&alert.analyzer));
        self.push_time(&mut element, Tag::CreateTime, Some(&alert.create_time))?;
        element.push_element(self.write_classification(&alert.classification));
        self.push_time(&mut element, Tag::DetectTime, alert.detect_time.as_ref())?;
        self.push_time(&mut element, Tag::AnalyzerTime, alert.analyzer_time.as_ref())?;
        for source in &alert.sources {
            element.push_element(self.write_source(source));
        }
        for target in &alert.targets {
            element.push_element(self.write_target(target)?);
        }
        if let Some(assessment) = &alert.assessment {
            element.push_element(self.write_assessment(assessment));
        }
        for data in &alert.additional_data {
            self.push_additional_data(&mut element, data);
        }

        match &alert.kind {
            AlertKind::Plain => {}
            AlertKind::Tool(tool) => element.push_element(self.write_tool_alert(tool)),
            AlertKind::Overflow(overflow) => {
                element.push_element(self.write_overflow_alert(overflow))
            }
            AlertKind::Correlation(correlation) => {
                element.push_element(self.write_correlation_alert(correlation))
            }
        }

        Ok(element)
    }

    fn write_classification(&self, classification: &Classification) -> XmlElement {
        let mut element = self.element(Tag::Classification);
        set_attr(&mut element, "ident", classification.ident.as_deref());
        set_attr(&mut element, "text", classification.text.as_deref());

        for reference in &classification.references {
            element.push_element(self.write_reference(reference));
        }

        element
    }

    fn write_reference(&self, reference: &Reference) -> XmlElement {
        let mut element = self.element(Tag::Reference);
        set_keyword(&mut element, "origin", reference.origin);
        set_attr(&mut element, "meaning", reference.meaning.as_deref());

        self.push_text(&mut element, Tag::Name, reference.name.as_str());
        self.push_text(&mut element, Tag::Url, reference.url.as_str());

        element
    }

    fn write_assessment(&self, assessment: &Assessment) -> XmlElement {
        let mut element = self.element(Tag::Assessment);

        if let Some(impact) = &assessment.impact {
            let mut child = self.element(Tag::Impact);
            set_keyword(&mut child, "severity", impact.severity);
            set_keyword(&mut child, "completion", impact.completion);
            set_keyword(&mut child, "type", impact.impact_type);
            push_content(&mut child, impact.description.as_deref());
            element.push_element(child);
        }
        for action in &assessment.actions {
            let mut child = self.element(Tag::Action);
            set_keyword(&mut child, "category", action.category);
            push_content(&mut child, action.description.as_deref());
            element.push_element(child);
        }
        if let Some(confidence) = &assessment.confidence {
            let mut child = self.element(Tag::Confidence);
            set_keyword(&mut child, "rating", confidence.rating);
            if let Some(value) = confidence.value {
                child.push_text(value.to_string());
            }
            element.push_element(child);
        }

        element
    }

    fn write_tool_alert(&self, tool: &ToolAlert) -> XmlElement {
        let mut element = self.element(Tag::ToolAlert);
        self.push_text(&mut element, Tag::Name, tool.name.as_str());
        self.push_text(&mut element, Tag::Command, tool.command.as_deref());
        self.push_alert_idents(&mut element, &tool.alert_idents);
        element
    }

    fn write_overflow_alert(&self, overflow: &OverflowAlert) -> XmlElement {
        let mut element = self.element(Tag::OverflowAlert);
        self.push_text(&mut element, Tag::Program, overflow.program.as_str());
        self.push_number(&mut element, Tag::Size, overflow.size.as_ref());
        if !overflow.buffer.is_empty() {
            self.push_text(
                &mut element,
                Tag::Buffer,
                encode_buffer(&overflow.buffer).as_str(),
            );
        }
        element
    }

    fn write_correlation_alert(&self, correlation: &CorrelationAlert) -> XmlElement {
        let mut element = self.element(Tag::CorrelationAlert);
        self.push_text(&mut element, Tag::Name, correlation.name.as_str());
        self.push_alert_idents(&mut element, &correlation.alert_idents);
        element
    }

    fn push_alert_idents(&self, parent: &mut XmlElement, idents: &[AlertIdent]) {
        for ident in idents.iter().filter(|ident| !ident.ident.is_empty()) {
            let mut child = self.element(Tag::AlertIdent);
            set_attr(&mut child, "analyzerid", ident.analyzer_id.as_deref());
            child.push_text(ident.ident.as_str());
            parent.push_element(child);
        }
    }
}

fn push_content(element: &mut XmlElement, text: Option<&str>) {
    if let Some(text) = text.filter(|text| !text.is_empty()) {
        element.push_text(text);
    }
}
