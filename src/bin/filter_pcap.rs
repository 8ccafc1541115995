//! Demonstration decoder and filter consumer over a pcap capture.
//!
//! Walks Ethernet/VLAN/IPv4/UDP headers, produces field values for a small
//! fixed field table, and evaluates one `field op literal` predicate against
//! every packet:
//!
//! ```text
//! filter_pcap capture.pcap ip.src == 192.168.1.1
//! filter_pcap capture.pcap udp.dstport '<' 1024
//! filter_pcap capture.pcap udp.payload contains 47:45:54
//! ```
//!
//! This binary is the interface demo for both sides of the core: the packet
//! walk is the producer (decoder) side, the predicate evaluation is the
//! consumer (filter evaluator) side.

use std::cmp::Ordering;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use fieldtypes::{literal, Endianness, FieldKind, FieldTypeError, FieldValue, Registry};
use pcap_parser::pcapng::Block as PcapNgBlock;
use pcap_parser::traits::{PcapNGPacketBlock, PcapReaderIterator};
use pcap_parser::{Linktype, PcapBlockOwned, PcapError};
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Contains,
    Matches,
    BitAnd,
}

fn parse_op(s: &str) -> Option<Op> {
    match s {
        "==" | "eq" => Some(Op::Eq),
        "!=" | "ne" => Some(Op::Ne),
        "<" | "lt" => Some(Op::Lt),
        "<=" | "le" => Some(Op::Le),
        ">" | "gt" => Some(Op::Gt),
        ">=" | "ge" => Some(Op::Ge),
        "contains" => Some(Op::Contains),
        "matches" | "~" => Some(Op::Matches),
        "&" => Some(Op::BitAnd),
        _ => None,
    }
}

const FIELD_TABLE: &[(&str, FieldKind)] = &[
    ("ip.src", FieldKind::Ipv4),
    ("ip.dst", FieldKind::Ipv4),
    ("ip.proto", FieldKind::Uint8),
    ("udp.srcport", FieldKind::Uint16),
    ("udp.dstport", FieldKind::Uint16),
    ("udp.length", FieldKind::Uint16),
    ("udp.payload", FieldKind::Bytes),
];

fn field_kind(name: &str) -> Option<FieldKind> {
    FIELD_TABLE
        .iter()
        .find(|(field, _)| *field == name)
        .map(|&(_, kind)| kind)
}

/// One compiled predicate: field, operator, and the pre-parsed right-hand side.
struct Predicate {
    field: String,
    op: Op,
    rhs: Option<FieldValue>,
    pattern: Option<Regex>,
}

impl Predicate {
    fn eval(&self, lhs: &FieldValue) -> Result<bool, FieldTypeError> {
        match self.op {
            Op::Eq => self.relational(lhs, |o| o == Ordering::Equal),
            Op::Ne => self.relational(lhs, |o| o != Ordering::Equal),
            Op::Lt => self.relational(lhs, |o| o == Ordering::Less),
            Op::Le => self.relational(lhs, |o| o != Ordering::Greater),
            Op::Gt => self.relational(lhs, |o| o == Ordering::Greater),
            Op::Ge => self.relational(lhs, |o| o != Ordering::Less),
            Op::Contains => match &self.rhs {
                Some(rhs) => lhs.contains(rhs),
                None => Ok(false),
            },
            Op::Matches => lhs.matches_regex(self.pattern.as_ref()),
            Op::BitAnd => match &self.rhs {
                Some(rhs) => lhs.bitwise_and(rhs),
                None => Ok(false),
            },
        }
    }

    fn relational(
        &self,
        lhs: &FieldValue,
        accept: fn(Ordering) -> bool,
    ) -> Result<bool, FieldTypeError> {
        match &self.rhs {
            Some(rhs) => lhs.order(rhs).map(accept),
            None => Ok(false),
        }
    }
}

#[derive(Default)]
struct Stats {
    packets: u64,
    ipv4: u64,
    evaluated: u64,
    matched: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 4 {
        eprintln!("usage: filter_pcap <capture.pcap> <field> <op> <literal>");
        eprintln!("fields:");
        for (field, kind) in FIELD_TABLE {
            eprintln!("  {field} ({kind})");
        }
        eprintln!("ops: == != < <= > >= contains matches &");
        std::process::exit(2);
    }
    let pcap_path = PathBuf::from(&args[0]);
    let field = args[1].clone();
    let op = parse_op(&args[2]).ok_or_else(|| anyhow::anyhow!("unknown operator: {}", args[2]))?;
    let literal_text = &args[3];

    let kind =
        field_kind(&field).ok_or_else(|| anyhow::anyhow!("unknown field: {field}"))?;

    // The compile phase of a real filter evaluator: verify the kind supports
    // the operation, then parse the literal once, up front. Errors here are
    // user-facing filter-compile errors.
    let descriptor = Registry::global().lookup(kind);
    let supported = match op {
        Op::Contains => descriptor.can_contains(),
        Op::Matches => descriptor.can_matches(),
        Op::BitAnd => descriptor.can_bitwise_and(),
        _ => descriptor.can_order(),
    };
    if !supported {
        anyhow::bail!("field {field} ({kind}) does not support operator {}", args[2]);
    }
    let predicate = match op {
        Op::Matches => {
            let pattern_text = if literal_text.starts_with('"') {
                literal::parse_quoted(literal_text).map_err(|e| anyhow::anyhow!("{e}"))?
            } else {
                literal_text.clone()
            };
            Predicate {
                field,
                op,
                rhs: None,
                pattern: Some(Regex::new(&pattern_text)?),
            }
        }
        _ => {
            let rhs = FieldValue::from_literal(kind, literal_text, op == Op::Contains)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            Predicate {
                field,
                op,
                rhs: Some(rhs),
                pattern: None,
            }
        }
    };

    // Probe file type (pcap vs pcapng) using the magic at start of file.
    let mut probe = [0u8; 4];
    {
        let mut f = File::open(&pcap_path)?;
        f.read_exact(&mut probe)?;
    }
    let is_pcapng = probe == [0x0a, 0x0d, 0x0d, 0x0a];

    let mut stats = Stats::default();
    let file = File::open(&pcap_path)?;
    if is_pcapng {
        run_pcapng(file, &predicate, &mut stats)?;
    } else {
        run_legacy_pcap(file, &predicate, &mut stats)?;
    }

    eprintln!("pcap: {}", pcap_path.display());
    eprintln!("packets: {}", stats.packets);
    eprintln!("ipv4 packets: {}", stats.ipv4);
    eprintln!("predicates evaluated: {}", stats.evaluated);
    eprintln!("matched: {}", stats.matched);
    Ok(())
}

fn run_legacy_pcap<R: Read>(
    file: R,
    predicate: &Predicate,
    stats: &mut Stats,
) -> anyhow::Result<()> {
    let mut reader = pcap_parser::pcap::LegacyPcapReader::new(1 << 20, file)?;
    let mut linktype: Option<Linktype> = None;
    loop {
        match reader.next() {
            Ok((offset, block)) => {
                match block {
                    PcapBlockOwned::LegacyHeader(h) => linktype = Some(h.network),
                    PcapBlockOwned::Legacy(b) => {
                        stats.packets += 1;
                        let lt = linktype.unwrap_or(Linktype(1));
                        process_frame(predicate, lt, b.data, stats.packets, stats);
                    }
                    PcapBlockOwned::NG(_) => {}
                }
                reader.consume(offset);
            }
            Err(PcapError::Eof) => break,
            Err(PcapError::Incomplete(_)) => {
                reader
                    .refill()
                    .map_err(|e| anyhow::anyhow!("pcap refill error: {:?}", e))?;
            }
            Err(e) => return Err(anyhow::anyhow!("pcap read error: {:?}", e)),
        }
    }
    Ok(())
}

fn run_pcapng<R: Read>(
    file: R,
    predicate: &Predicate,
    stats: &mut Stats,
) -> anyhow::Result<()> {
    let mut reader = pcap_parser::pcapng::PcapNGReader::new(1 << 20, file)?;
    let mut if_linktypes: Vec<Linktype> = Vec::new();
    loop {
        match reader.next() {
            Ok((offset, block)) => {
                if let PcapBlockOwned::NG(b) = block {
                    match &b {
                        PcapNgBlock::InterfaceDescription(idb) => if_linktypes.push(idb.linktype),
                        PcapNgBlock::EnhancedPacket(epb) => {
                            stats.packets += 1;
                            let lt = if_linktypes
                                .get(epb.if_id as usize)
                                .copied()
                                .unwrap_or(Linktype(1));
                            process_frame(predicate, lt, epb.packet_data(), stats.packets, stats);
                        }
                        PcapNgBlock::SimplePacket(spb) => {
                            stats.packets += 1;
                            let lt = if_linktypes.first().copied().unwrap_or(Linktype(1));
                            process_frame(predicate, lt, spb.packet_data(), stats.packets, stats);
                        }
                        _ => {}
                    }
                }
                reader.consume(offset);
            }
            Err(PcapError::Eof) => break,
            Err(PcapError::Incomplete(_)) => {
                reader
                    .refill()
                    .map_err(|e| anyhow::anyhow!("pcapng refill error: {:?}", e))?;
            }
            Err(e) => return Err(anyhow::anyhow!("pcapng read error: {:?}", e)),
        }
    }
    Ok(())
}

fn process_frame(
    predicate: &Predicate,
    linktype: Linktype,
    frame: &[u8],
    packet_index: u64,
    stats: &mut Stats,
) {
    let Some(l3) = l3_from_linktype(linktype, frame) else {
        return;
    };
    let Some(fields) = parse_ipv4(l3) else {
        return;
    };
    stats.ipv4 += 1;
    let Some(lhs) = extract_field(&fields, &predicate.field) else {
        return;
    };
    stats.evaluated += 1;
    // A dispatch error here means the compile-phase check let something
    // through; treat the predicate as not matching, never abort the run.
    match predicate.eval(&lhs) {
        Ok(true) => {
            stats.matched += 1;
            let shown = lhs
                .to_display_text()
                .unwrap_or_else(|_| "<unprintable>".to_string());
            println!("packet {packet_index}: {} = {shown}", predicate.field);
        }
        Ok(false) => {}
        Err(err) => log::warn!("packet {packet_index}: predicate skipped: {err}"),
    }
}

/// Decoded IPv4/UDP header slices for the fixed field table. Borrowed from
/// the frame; field values copy out of these on demand.
struct PacketFields<'a> {
    ip_src: &'a [u8],
    ip_dst: &'a [u8],
    ip_proto: u8,
    udp: Option<UdpFields<'a>>,
}

struct UdpFields<'a> {
    srcport: &'a [u8],
    dstport: &'a [u8],
    length: &'a [u8],
    payload: &'a [u8],
}

fn extract_field(fields: &PacketFields<'_>, name: &str) -> Option<FieldValue> {
    match name {
        "ip.src" => FieldValue::ipv4_from_wire(fields.ip_src).ok(),
        "ip.dst" => FieldValue::ipv4_from_wire(fields.ip_dst).ok(),
        "ip.proto" => {
            FieldValue::uint_from_wire(FieldKind::Uint8, &[fields.ip_proto], Endianness::Big).ok()
        }
        "udp.srcport" => fields.udp.as_ref().and_then(|u| {
            FieldValue::uint_from_wire(FieldKind::Uint16, u.srcport, Endianness::Big).ok()
        }),
        "udp.dstport" => fields.udp.as_ref().and_then(|u| {
            FieldValue::uint_from_wire(FieldKind::Uint16, u.dstport, Endianness::Big).ok()
        }),
        "udp.length" => fields.udp.as_ref().and_then(|u| {
            FieldValue::uint_from_wire(FieldKind::Uint16, u.length, Endianness::Big).ok()
        }),
        "udp.payload" => fields
            .udp
            .as_ref()
            .map(|u| FieldValue::bytes_from_wire(u.payload)),
        _ => None,
    }
}

fn l3_from_linktype(linktype: Linktype, frame: &[u8]) -> Option<&[u8]> {
    match linktype.0 {
        1 => ethernet_l3(frame),     // DLT_EN10MB
        101 => Some(frame),          // DLT_RAW
        113 => linux_sll_l3(frame),  // DLT_LINUX_SLL
        _ => None,
    }
}

fn ethernet_l3(frame: &[u8]) -> Option<&[u8]> {
    if frame.len() < 14 {
        return None;
    }
    let mut off = 12usize;
    let mut ethertype = u16::from_be_bytes([frame[off], frame[off + 1]]);
    off += 2;
    // VLAN tags (802.1Q / 802.1ad): skip tag (4 bytes) and read next ethertype.
    while ethertype == 0x8100 || ethertype == 0x88a8 {
        if frame.len() < off + 4 + 2 {
            return None;
        }
        off += 4;
        ethertype = u16::from_be_bytes([frame[off], frame[off + 1]]);
        off += 2;
    }
    match ethertype {
        0x0800 => Some(&frame[off..]), // IPv4
        _ => None,
    }
}

fn linux_sll_l3(frame: &[u8]) -> Option<&[u8]> {
    // Linux cooked capture v1 (SLL): 16-byte header, protocol at bytes 14..16
    if frame.len() < 16 {
        return None;
    }
    let proto = u16::from_be_bytes([frame[14], frame[15]]);
    match proto {
        0x0800 => Some(&frame[16..]), // IPv4
        _ => None,
    }
}

fn parse_ipv4(l3: &[u8]) -> Option<PacketFields<'_>> {
    if l3.len() < 20 {
        return None;
    }
    let ver_ihl = l3[0];
    if (ver_ihl >> 4) != 4 {
        return None;
    }
    let ihl = (ver_ihl & 0x0f) as usize * 4;
    if ihl < 20 || l3.len() < ihl {
        return None;
    }
    let total_len = u16::from_be_bytes([l3[2], l3[3]]) as usize;
    if total_len < ihl {
        return None;
    }
    // Trim Ethernet padding on short frames using the IPv4 total length.
    let l3 = if total_len <= l3.len() {
        &l3[..total_len]
    } else {
        l3
    };
    let fields = PacketFields {
        ip_src: &l3[12..16],
        ip_dst: &l3[16..20],
        ip_proto: l3[9],
        udp: parse_udp(l3, ihl),
    };
    Some(fields)
}

fn parse_udp(l3: &[u8], ihl: usize) -> Option<UdpFields<'_>> {
    if l3[9] != 17 {
        return None; // not UDP
    }
    let udp = l3.get(ihl..)?;
    if udp.len() < 8 {
        return None;
    }
    let udp_len = u16::from_be_bytes([udp[4], udp[5]]) as usize;
    if udp_len < 8 || udp.len() < udp_len {
        return None;
    }
    Some(UdpFields {
        srcport: &udp[0..2],
        dstport: &udp[2..4],
        length: &udp[4..6],
        payload: &udp[8..udp_len],
    })
}
