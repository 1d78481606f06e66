//! Closed value sets of RFC 4765.
//!
//! Each enum here is declared through `idmef_enum!`, which supplies keyword
//! lookup in both directions. Where the RFC defines a default for an attribute,
//! the enum implements `Default` and the owning entity exposes an accessor that
//! applies it; the stored field stays `None` when the attribute was absent.

/// A closed vocabulary whose values are written as keywords.
pub trait Keyword: Sized + Copy {
    fn keyword(self) -> &'static str;

    fn from_wire(value: &str) -> Result<Self, crate::err::ValueError>;
}

/// Compares a wire value against a canonical keyword, ignoring hyphens and case.
pub(crate) fn keyword_matches(input: &str, keyword: &str) -> bool {
    let lhs = input
        .chars()
        .filter(|c| *c != '-')
        .flat_map(char::to_uppercase);
    let rhs = keyword
        .chars()
        .filter(|c| *c != '-')
        .flat_map(char::to_uppercase);
    lhs.eq(rhs)
}

idmef_enum! {
    /// `Node@category`: the domain from which the name information was obtained.
    pub enum NodeCategory {
        Unknown => "unknown",
        Ads => "ads",
        Afs => "afs",
        Coda => "coda",
        Dfs => "dfs",
        Dns => "dns",
        Hosts => "hosts",
        Kerberos => "kerberos",
        Nds => "nds",
        Nis => "nis",
        NisPlus => "nisplus",
        Nt => "nt",
        Wfw => "wfw",
    }
}

idmef_enum! {
    /// `Address@category`: the type of address represented.
    pub enum AddressCategory {
        Unknown => "unknown",
        Atm => "atm",
        Email => "e-mail",
        LotusNotes => "lotus-notes",
        Mac => "mac",
        Sna => "sna",
        Vm => "vm",
        Ipv4Addr => "ipv4-addr",
        Ipv4AddrHex => "ipv4-addr-hex",
        Ipv4Net => "ipv4-net",
        Ipv4NetMask => "ipv4-net-mask",
        Ipv6Addr => "ipv6-addr",
        Ipv6AddrHex => "ipv6-addr-hex",
        Ipv6Net => "ipv6-net",
        Ipv6NetMask => "ipv6-net-mask",
    }
}

idmef_enum! {
    /// `User@category`.
    pub enum UserCategory {
        Unknown => "unknown",
        Application => "application",
        OsDevice => "os-device",
    }
}

idmef_enum! {
    /// `UserId@type`.
    pub enum UserIdType {
        CurrentUser => "current-user",
        OriginalUser => "original-user",
        TargetUser => "target-user",
        UserPrivs => "user-privs",
        CurrentGroup => "current-group",
        GroupPrivs => "group-privs",
        OtherPrivs => "other-privs",
    }
}

idmef_enum! {
    /// `Source@spoofed`.
    pub enum Spoofed {
        Unknown => "unknown",
        Yes => "yes",
        No => "no",
    }
}

idmef_enum! {
    /// `Target@decoy`.
    pub enum Decoy {
        Unknown => "unknown",
        Yes => "yes",
        No => "no",
    }
}

idmef_enum! {
    /// `File@category`.
    pub enum FileCategory {
        /// The file information is from after the reported change.
        Current => "current",
        /// The file information is from before the reported change.
        Original => "original",
    }
}

idmef_enum! {
    /// `Linkage@category`.
    pub enum LinkageCategory {
        HardLink => "hard-link",
        MountPoint => "mount-point",
        ReparsePoint => "reparse-point",
        Shortcut => "shortcut",
        Stream => "stream",
        SymbolicLink => "symbolic-link",
    }
}

idmef_enum! {
    /// `Permission@perms`.
    pub enum Permission {
        NoAccess => "noAccess",
        Read => "read",
        Write => "write",
        Execute => "execute",
        Search => "search",
        Delete => "delete",
        ExecuteAs => "executeAs",
        ChangePermissions => "changePermissions",
        TakeOwnership => "takeOwnership",
    }
}

idmef_enum! {
    /// `Checksum@algorithm`.
    pub enum ChecksumAlgorithm {
        Md4 => "MD4",
        Md5 => "MD5",
        Sha1 => "SHA1",
        Sha2_256 => "SHA2-256",
        Sha2_384 => "SHA2-384",
        Sha2_512 => "SHA2-512",
        Crc32 => "CRC-32",
        Haval => "Haval",
        Tiger => "Tiger",
        Gost => "Gost",
    }
}

idmef_enum! {
    /// `Reference@origin`.
    pub enum ReferenceOrigin {
        Unknown => "unknown",
        VendorSpecific => "vendor-specific",
        UserSpecific => "user-specific",
        BugtraqId => "bugtraqid",
        Cve => "cve",
        Osvdb => "osvdb",
    }
}

idmef_enum! {
    /// `Impact@severity`.
    pub enum ImpactSeverity {
        Info => "info",
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

idmef_enum! {
    /// `Impact@completion`.
    pub enum ImpactCompletion {
        Failed => "failed",
        Succeeded => "succeeded",
    }
}

idmef_enum! {
    /// `Impact@type`.
    pub enum ImpactType {
        Admin => "admin",
        Dos => "dos",
        File => "file",
        Recon => "recon",
        User => "user",
        Other => "other",
    }
}

idmef_enum! {
    /// `Action@category`.
    pub enum ActionCategory {
        BlockInstalled => "block-installed",
        NotificationSent => "notification-sent",
        TakenOffline => "taken-offline",
        Other => "other",
    }
}

idmef_enum! {
    /// `Confidence@rating`.
    pub enum ConfidenceRating {
        Low => "low",
        Medium => "medium",
        High => "high",
        Numeric => "numeric",
    }
}

idmef_enum! {
    /// `AdditionalData@type`, which also names the element that carries each value.
    pub enum AdditionalDataType {
        Boolean => "boolean",
        Byte => "byte",
        Character => "character",
        DateTime => "date-time",
        Integer => "integer",
        NtpStamp => "ntpstamp",
        Portlist => "portlist",
        Real => "real",
        String => "string",
        ByteString => "byte-string",
        XmlText => "xmltext",
    }
}

impl Default for NodeCategory {
    fn default() -> Self {
        NodeCategory::Unknown
    }
}

impl Default for AddressCategory {
    fn default() -> Self {
        AddressCategory::Unknown
    }
}

impl Default for UserCategory {
    fn default() -> Self {
        UserCategory::Unknown
    }
}

impl Default for UserIdType {
    fn default() -> Self {
        UserIdType::OriginalUser
    }
}

impl Default for Spoofed {
    fn default() -> Self {
        Spoofed::Unknown
    }
}

impl Default for Decoy {
    fn default() -> Self {
        Decoy::Unknown
    }
}

impl Default for ReferenceOrigin {
    fn default() -> Self {
        ReferenceOrigin::Unknown
    }
}

impl Default for ImpactType {
    fn default() -> Self {
        ImpactType::Other
    }
}

impl Default for ActionCategory {
    fn default() -> Self {
        ActionCategory::Other
    }
}

impl Default for ConfidenceRating {
    fn default() -> Self {
        ConfidenceRating::Numeric
    }
}

impl Default for AdditionalDataType {
    fn default() -> Self {
        AdditionalDataType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::ValueError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_ignores_hyphens_and_case() {
        assert_eq!(
            AddressCategory::from_wire("e-mail").unwrap(),
            AddressCategory::Email
        );
        assert_eq!(
            AddressCategory::from_wire("IPv4-Addr").unwrap(),
            AddressCategory::Ipv4Addr
        );
        assert_eq!(
            AddressCategory::from_wire("ipv4addrhex").unwrap(),
            AddressCategory::Ipv4AddrHex
        );
        assert_eq!(
            ChecksumAlgorithm::from_wire("sha2-256").unwrap(),
            ChecksumAlgorithm::Sha2_256
        );
        assert_eq!(
            Permission::from_wire("EXECUTEAS").unwrap(),
            Permission::ExecuteAs
        );
    }

    #[test]
    fn test_keyword_is_canonical_on_output() {
        assert_eq!(AddressCategory::Email.keyword(), "e-mail");
        assert_eq!(AddressCategory::Ipv4Addr.to_string(), "ipv4-addr");
        assert_eq!(Permission::TakeOwnership.keyword(), "takeOwnership");
        assert_eq!(ChecksumAlgorithm::Crc32.keyword(), "CRC-32");
        assert_eq!(AdditionalDataType::ByteString.keyword(), "byte-string");
    }

    #[test]
    fn test_unknown_keyword_names_the_vocabulary() {
        let err = NodeCategory::from_wire("ldap").unwrap_err();
        assert_eq!(
            err,
            ValueError::UnknownKeyword {
                enum_name: "NodeCategory",
                value: "ldap".to_owned()
            }
        );
    }

    #[test]
    fn test_every_keyword_reads_back() {
        for value in AddressCategory::ALL {
            assert_eq!(AddressCategory::from_wire(value.keyword()).unwrap(), *value);
        }
        for value in AdditionalDataType::ALL {
            assert_eq!(
                AdditionalDataType::from_wire(value.keyword()).unwrap(),
                *value
            );
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(UserIdType::default(), UserIdType::OriginalUser);
        assert_eq!(ConfidenceRating::default(), ConfidenceRating::Numeric);
        assert_eq!(ImpactType::default(), ImpactType::Other);
    }
}
