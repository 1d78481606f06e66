use super::*;
use crate::model::{
    AddressCategory, AlertKind, BigInt, ChecksumAlgorithm, ImpactSeverity, NodeCategory, Operator, Permission,
    PortRange, ServiceKind, UserIdType,
};
use crate::xml_reader::read_document;
use pretty_assertions::assert_eq;

fn parse_with(xml: &str, tags: &TagNames) -> Result<Message> {
    let root = read_document(xml, 64)?;
    MessageReader::new(tags).read_message(&root)
}

fn parse(xml: &str) -> Result<Message> {
    parse_with(xml, &TagNames::default())
}

const HEARTBEAT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<idmef:IDMEF-Message version="1.0" xmlns:idmef="http://iana.org/idmef">
  <idmef:Heartbeat messageid="abc123456789">
    <idmef:Analyzer analyzerid="hq-dmz-analyzer01">
      <idmef:Node category="dns">
        <idmef:location>Headquarters DMZ Network</idmef:location>
        <idmef:name>analyzer01.example.com</idmef:name>
        <idmef:Address category="IPv4-Addr" vlan-num=" 12 ">
          <idmef:address>192.0.2.1</idmef:address>
        </idmef:Address>
      </idmef:Node>
    </idmef:Analyzer>
    <idmef:CreateTime ntpstamp="0xbc722ebe.0x00000000">2000-03-09T14:07:58Z</idmef:CreateTime>
    <idmef:HeartbeatInterval>600</idmef:HeartbeatInterval>
    <idmef:AdditionalData type="real" meaning="%memused">
      <idmef:real>62.5</idmef:real>
    </idmef:AdditionalData>
  </idmef:Heartbeat>
</idmef:IDMEF-Message>"#;

#[test]
fn test_parses_heartbeat() {
    let message = parse(HEARTBEAT).unwrap();
    assert_eq!(message.version, "1.0");
    let heartbeat = message.as_heartbeat().unwrap();

    assert_eq!(heartbeat.message_id.as_deref(), Some("abc123456789"));
    assert_eq!(heartbeat.heartbeat_interval, Some(600));
    assert_eq!(
        heartbeat.analyzer.analyzer_id.as_deref(),
        Some("hq-dmz-analyzer01")
    );

    let node = heartbeat.analyzer.node.as_ref().unwrap();
    assert_eq!(node.category, Some(NodeCategory::Dns));
    assert_eq!(node.name.as_deref(), Some("analyzer01.example.com"));
    assert_eq!(node.addresses.len(), 1);
    assert_eq!(node.addresses[0].category, Some(AddressCategory::Ipv4Addr));
    assert_eq!(node.addresses[0].vlan_num, Some(12));
    assert_eq!(node.addresses[0].address, "192.0.2.1");

    assert_eq!(heartbeat.create_time.operator, None);
    assert_eq!(heartbeat.create_time.adjusted_time, 0);
    assert_eq!(
        heartbeat.create_time.ntp_stamp.as_ref().map(|s| s.as_str()),
        Some("0xbc722ebe.0x00000000")
    );

    assert_eq!(heartbeat.additional_data.len(), 1);
    assert_eq!(heartbeat.additional_data[0].values, ["62.5"]);
    assert_eq!(heartbeat.analyzer_time, None);
}

#[test]
fn test_missing_version_defaults() {
    let message = parse(
        r#"<idmef:IDMEF-Message><idmef:Heartbeat/></idmef:IDMEF-Message>"#,
    )
    .unwrap();
    assert_eq!(message.version, DEFAULT_VERSION);
    assert_eq!(message.as_heartbeat().unwrap().heartbeat_interval, None);
}

#[test]
fn test_root_and_body_errors() {
    let err = parse("<Message><idmef:Alert/></Message>").unwrap_err();
    assert!(matches!(err, IdmefError::UnexpectedRoot { ref found, .. } if found == "Message"));

    let err = parse("<idmef:IDMEF-Message>  </idmef:IDMEF-Message>").unwrap_err();
    assert!(matches!(err, IdmefError::EmptyMessage));

    let err = parse("<idmef:IDMEF-Message><idmef:Analyzer/></idmef:IDMEF-Message>").unwrap_err();
    assert!(
        matches!(err, IdmefError::UnknownMessageKind { ref found } if found == "idmef:Analyzer")
    );
}

#[test]
fn test_value_errors_name_the_element() {
    let err = parse(
        r#"<idmef:IDMEF-Message><idmef:Heartbeat>
             <idmef:HeartbeatInterval>ten</idmef:HeartbeatInterval>
           </idmef:Heartbeat></idmef:IDMEF-Message>"#,
    )
    .unwrap_err();
    match err {
        IdmefError::Value { element, source } => {
            assert_eq!(element, "idmef:HeartbeatInterval");
            assert_eq!(
                source,
                ValueError::InvalidInteger {
                    value: "ten".to_owned()
                }
            );
        }
        other => panic!("unexpected error {other:?}"),
    }

    let err = parse(
        r#"<idmef:IDMEF-Message><idmef:Heartbeat><idmef:Analyzer>
             <idmef:Node category="nowhere"/>
           </idmef:Analyzer></idmef:Heartbeat></idmef:IDMEF-Message>"#,
    )
    .unwrap_err();
    assert!(
        matches!(err, IdmefError::Value { ref element, .. } if element == "idmef:Node@category")
    );

    let err = parse(
        r#"<idmef:IDMEF-Message><idmef:Heartbeat>
             <idmef:CreateTime ntpstamp="0xbc722ebe">2000-03-09T14:07:58Z</idmef:CreateTime>
           </idmef:Heartbeat></idmef:IDMEF-Message>"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        IdmefError::Value {
            source: ValueError::InvalidNtpStamp { .. },
            ..
        }
    ));
}

const TOOL_ALERT: &str = r#"<idmef:IDMEF-Message version="1.0" xmlns:idmef="http://iana.org/idmef">
  <idmef:Alert messageid="abc123456789">
    <idmef:Analyzer analyzerid="bc-sensor01"/>
    <idmef:CreateTime ntpstamp="0xbc71e980.0x00000000">2000-03-09T08:12:32-05:00</idmef:CreateTime>
    <idmef:Classification text="Unauthorized administrative access"/>
    <idmef:Source ident="a1" spoofed="no">
      <idmef:Service ip_version="4">
        <idmef:port>31337</idmef:port>
      </idmef:Service>
    </idmef:Source>
    <idmef:Target decoy="yes" interface="eth0">
      <idmef:User category="os-device">
        <idmef:UserId type="target-user">
          <idmef:name>root</idmef:name>
          <idmef:number>0</idmef:number>
        </idmef:UserId>
      </idmef:User>
      <idmef:Service>
        <idmef:portlist>3-15, 19,29-29</idmef:portlist>
        <idmef:WebService>
          <idmef:url>http://www.example.com/cgi-bin/phf?/etc/group</idmef:url>
          <idmef:cgi>/cgi-bin/phf</idmef:cgi>
          <idmef:http-method>GET</idmef:http-method>
        </idmef:WebService>
      </idmef:Service>
      <idmef:File category="current">
        <idmef:name>passwd</idmef:name>
        <idmef:path>/etc/passwd</idmef:path>
        <idmef:data-size>123456789012345678901234567890</idmef:data-size>
        <idmef:FileAccess>
          <idmef:UserId type="user-privs"><idmef:name>admin</idmef:name></idmef:UserId>
          <idmef:Permission perms="read"/>
          <idmef:Permission perms="executeAs"/>
        </idmef:FileAccess>
        <idmef:Checksum algorithm="sha2-256">
          <idmef:value>4a8c</idmef:value>
        </idmef:Checksum>
      </idmef:File>
    </idmef:Target>
    <idmef:Assessment>
      <idmef:Impact severity="high" completion="succeeded" type="admin">root shell</idmef:Impact>
      <idmef:Action category="notification-sent">page</idmef:Action>
      <idmef:Confidence rating="numeric">0.5</idmef:Confidence>
    </idmef:Assessment>
    <idmef:ToolAlert>
      <idmef:name>lpd-exploit</idmef:name>
      <idmef:alertident>123456781</idmef:alertident>
      <idmef:alertident analyzerid="a2">123456782</idmef:alertident>
      <idmef:alertident>  </idmef:alertident>
    </idmef:ToolAlert>
  </idmef:Alert>
</idmef:IDMEF-Message>"#;

#[test]
fn test_parses_tool_alert() {
    let message = parse(TOOL_ALERT).unwrap();
    let alert = message.as_alert().unwrap();

    assert_eq!(alert.create_time.operator, Some(Operator::Minus));
    assert_eq!(alert.create_time.adjusted_time, 5 * 3_600_000);

    let tool = alert.tool_alert().unwrap();
    assert!(alert.overflow_alert().is_none());
    assert!(alert.correlation_alert().is_none());
    assert_eq!(tool.name, "lpd-exploit");
    assert_eq!(tool.alert_idents.len(), 2);
    assert_eq!(tool.alert_idents[1].analyzer_id.as_deref(), Some("a2"));

    let source = &alert.sources[0];
    assert_eq!(source.ident.as_deref(), Some("a1"));
    assert_eq!(source.service.as_ref().unwrap().port, Some(31337));
    assert_eq!(source.service.as_ref().unwrap().ip_version, Some(4));

    let target = &alert.targets[0];
    assert_eq!(target.interface.as_deref(), Some("eth0"));
    let user_id = &target.user.as_ref().unwrap().user_ids[0];
    assert_eq!(user_id.id_type, Some(UserIdType::TargetUser));
    assert_eq!(user_id.number, Some(0));

    let service = target.service.as_ref().unwrap();
    assert_eq!(
        service.portlist,
        [
            PortRange::new(3, 15).unwrap(),
            PortRange::single(19),
            PortRange::single(29)
        ]
    );
    match &service.kind {
        ServiceKind::Web(web) => {
            assert_eq!(web.http_method.as_deref(), Some("GET"));
            assert_eq!(web.cgi.as_deref(), Some("/cgi-bin/phf"));
        }
        other => panic!("unexpected service kind {other:?}"),
    }

    let file = &target.files[0];
    assert_eq!(file.path, "/etc/passwd");
    assert_eq!(
        file.data_size.as_ref().map(ToString::to_string).as_deref(),
        Some("123456789012345678901234567890")
    );
    assert_eq!(
        file.file_accesses[0].permissions,
        [Permission::Read, Permission::ExecuteAs]
    );
    assert_eq!(file.checksums[0].algorithm, Some(ChecksumAlgorithm::Sha2_256));

    let assessment = alert.assessment.as_ref().unwrap();
    let impact = assessment.impact.as_ref().unwrap();
    assert_eq!(impact.severity, Some(ImpactSeverity::High));
    assert_eq!(impact.description.as_deref(), Some("root shell"));
    assert_eq!(assessment.actions[0].description.as_deref(), Some("page"));
    assert_eq!(assessment.confidence.as_ref().unwrap().value, Some(0.5));
}

#[test]
fn test_subtype_keeps_base_fields() {
    let plain = TOOL_ALERT.replace(
        &TOOL_ALERT[TOOL_ALERT.find("<idmef:ToolAlert>").unwrap()
            ..TOOL_ALERT.find("</idmef:ToolAlert>").unwrap() + "</idmef:ToolAlert>".len()],
        "",
    );

    let tool = parse(TOOL_ALERT).unwrap();
    let plain = parse(&plain).unwrap();
    let tool = tool.as_alert().unwrap().clone();
    assert_eq!(tool.into_kind(AlertKind::Plain), *plain.as_alert().unwrap());
}

#[test]
fn test_multiple_alert_subtypes_rejected() {
    let err = parse(
        r#"<idmef:IDMEF-Message><idmef:Alert>
             <idmef:ToolAlert><idmef:name>a</idmef:name></idmef:ToolAlert>
             <idmef:CorrelationAlert><idmef:name>b</idmef:name></idmef:CorrelationAlert>
           </idmef:Alert></idmef:IDMEF-Message>"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        IdmefError::MultipleAlertSubtypes { ref first, ref second }
            if first == "idmef:ToolAlert" && second == "idmef:CorrelationAlert"
    ));
}

#[test]
fn test_multiple_service_subtypes_rejected() {
    let err = parse(
        r#"<idmef:IDMEF-Message><idmef:Alert><idmef:Source><idmef:Service>
             <idmef:WebService><idmef:url>http://a</idmef:url></idmef:WebService>
             <idmef:SNMPService><idmef:oid>1.3.6</idmef:oid></idmef:SNMPService>
           </idmef:Service></idmef:Source></idmef:Alert></idmef:IDMEF-Message>"#,
    )
    .unwrap_err();
    assert!(matches!(err, IdmefError::MultipleServiceSubtypes { .. }));
}

#[test]
fn test_overflow_alert_buffer() {
    let message = parse(
        r#"<idmef:IDMEF-Message><idmef:Alert>
             <idmef:OverflowAlert>
               <idmef:program>/usr/sbin/lpd</idmef:program>
               <idmef:size>3</idmef:size>
               <idmef:buffer>00FF10</idmef:buffer>
             </idmef:OverflowAlert>
           </idmef:Alert></idmef:IDMEF-Message>"#,
    )
    .unwrap();
    let overflow = message.as_alert().unwrap().overflow_alert().unwrap();
    assert_eq!(overflow.program, "/usr/sbin/lpd");
    assert_eq!(overflow.size, Some(BigInt::from(3)));
    assert_eq!(overflow.buffer, [0, -1, 16]);
}

#[test]
fn test_unknown_children_are_ignored() {
    let message = parse(
        r#"<idmef:IDMEF-Message><idmef:Heartbeat>
             <vendor:Extra>x</vendor:Extra>
             <idmef:Classification text="misplaced"/>
             <idmef:HeartbeatInterval>5</idmef:HeartbeatInterval>
           </idmef:Heartbeat></idmef:IDMEF-Message>"#,
    )
    .unwrap();
    assert_eq!(message.as_heartbeat().unwrap().heartbeat_interval, Some(5));
}

#[test]
fn test_custom_tag_names() {
    let mut tags = TagNames::default();
    for tag in Tag::ALL {
        tags.set(*tag, tag.logical_name()).unwrap();
    }

    let message = parse_with(
        r#"<IDMEF-Message version="2.0"><Heartbeat>
             <HeartbeatInterval>60</HeartbeatInterval>
           </Heartbeat></IDMEF-Message>"#,
        &tags,
    )
    .unwrap();
    assert_eq!(message.version, "2.0");
    assert_eq!(message.as_heartbeat().unwrap().heartbeat_interval, Some(60));

    let err = parse_with(HEARTBEAT, &tags).unwrap_err();
    assert!(matches!(err, IdmefError::UnexpectedRoot { .. }));
}

#[test]
fn test_time_requires_ntp_stamp() {
    let err = parse(
        r#"<idmef:IDMEF-Message><idmef:Alert>
             <idmef:CreateTime>2000-03-09T10:01:25Z</idmef:CreateTime>
           </idmef:Alert></idmef:IDMEF-Message>"#,
    )
    .unwrap_err();
    match err {
        IdmefError::Value { element, source } => {
            assert_eq!(element, "idmef:CreateTime@ntpstamp");
            assert_eq!(source, ValueError::MissingNtpStamp);
        }
        other => panic!("unexpected error {other:?}"),
    }

    let err = parse(
        r#"<idmef:IDMEF-Message><idmef:Alert><idmef:Target><idmef:File>
             <idmef:modify-time ntpstamp=" ">2000-03-09T10:01:25Z</idmef:modify-time>
           </idmef:File></idmef:Target></idmef:Alert></idmef:IDMEF-Message>"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        IdmefError::Value {
            source: ValueError::MissingNtpStamp,
            ..
        }
    ));
}

#[test]
fn test_additional_data_values_are_verbatim() {
    let message = parse(
        r#"<idmef:IDMEF-Message><idmef:Heartbeat>
             <idmef:AdditionalData type="string" meaning="padding">
               <idmef:string>  padded  </idmef:string>
               <idmef:string></idmef:string>
               <idmef:string/>
               <idmef:string>x</idmef:string>
             </idmef:AdditionalData>
           </idmef:Heartbeat></idmef:IDMEF-Message>"#,
    )
    .unwrap();

    let data = &message.as_heartbeat().unwrap().additional_data[0];
    assert_eq!(data.values, ["  padded  ", "", "", "x"]);
}

#[test]
fn test_confidence_must_be_finite() {
    for value in ["NaN", "inf", "-infinity"] {
        let err = parse(&format!(
            r#"<idmef:IDMEF-Message><idmef:Alert><idmef:Assessment>
                 <idmef:Confidence rating="numeric">{value}</idmef:Confidence>
               </idmef:Assessment></idmef:Alert></idmef:IDMEF-Message>"#
        ))
        .unwrap_err();
        assert!(
            matches!(
                err,
                IdmefError::Value {
                    source: ValueError::InvalidReal { .. },
                    ..
                }
            ),
            "`{value}` was accepted: {err:?}"
        );
    }

    let message = parse(
        r#"<idmef:IDMEF-Message><idmef:Alert><idmef:Assessment>
             <idmef:Confidence rating="numeric">0.25</idmef:Confidence>
           </idmef:Assessment></idmef:Alert></idmef:IDMEF-Message>"#,
    )
    .unwrap();
    let assessment = message.as_alert().unwrap().assessment.as_ref().unwrap();
    assert_eq!(assessment.confidence.as_ref().unwrap().value, Some(0.25));
}
