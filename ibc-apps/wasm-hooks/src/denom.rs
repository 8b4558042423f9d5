//! Resolution of the local denomination of received ICS-20 tokens.

use core::str::FromStr;

use ibc_middleware_types::packet::Packet;
use ibc_middleware_types::transfer::{is_receiver_chain_source, PrefixedDenom, TracePrefix};
use sha2::{Digest, Sha256};

/// Returns the denomination under which the transfer application credits the
/// tokens of a received packet.
///
/// When this chain is the source of the token, the sender's
/// `{port}/{channel}/` prefix is stripped, leaving either the native base
/// denom or a shorter trace. Otherwise this chain's own destination prefix is
/// added. Any remaining trace is represented by its `ibc/{hash}` form.
pub fn local_denom_on_recv(packet: &Packet, denom: &str) -> Result<String, String> {
    let mut denom = PrefixedDenom::from_str(denom).map_err(|e| e.to_string())?;

    if is_receiver_chain_source(
        packet.port_id_on_a.clone(),
        packet.chan_id_on_a.clone(),
        &denom,
    ) {
        let prefix = TracePrefix::new(packet.port_id_on_a.clone(), packet.chan_id_on_a.clone());
        denom.remove_trace_prefix(&prefix);
        if denom.trace_path.is_empty() {
            return Ok(denom.base_denom.to_string());
        }
    } else {
        let prefix = TracePrefix::new(packet.port_id_on_b.clone(), packet.chan_id_on_b.clone());
        denom.add_trace_prefix(prefix);
    }

    Ok(ibc_denom(&denom))
}

/// `ibc/{HEX(sha256(full trace path))}`
pub fn ibc_denom(denom: &PrefixedDenom) -> String {
    let hash = Sha256::digest(denom.to_string().as_bytes());
    format!("ibc/{}", hex::encode_upper(hash))
}

#[cfg(test)]
mod tests {
    use ibc_middleware_testkit::fixtures::PacketConfig;
    use ibc_middleware_types::identifiers::ChannelId;
    use rstest::rstest;

    use super::*;

    fn packet() -> Packet {
        PacketConfig::builder()
            .chan_id_on_a(ChannelId::new(5))
            .chan_id_on_b(ChannelId::new(0))
            .build()
    }

    #[rstest]
    // foreign token: prefixed with our own end of the channel
    #[case("uatom", "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2")]
    // our native token coming home
    #[case("transfer/channel-5/uworm", "uworm")]
    // a voucher of ours coming home still carries the rest of its trace
    #[case(
        "transfer/channel-5/transfer/channel-1/transfer/channel-9/uosmo",
        "ibc/6019DBB749869FE5C76C8B6206B0714476062068016C54A367F43DE05B738414"
    )]
    fn resolves_local_denom(#[case] denom: &str, #[case] expected: &str) {
        assert_eq!(local_denom_on_recv(&packet(), denom).unwrap(), expected);
    }

    #[test]
    fn prefix_of_another_channel_is_not_stripped() {
        let packet = PacketConfig::builder()
            .chan_id_on_a(ChannelId::new(3))
            .chan_id_on_b(ChannelId::new(5))
            .build();
        // "transfer/channel-5/uatom" was not sent by us over channel-3, so it
        // gets our destination prefix on top of its trace.
        let expected = ibc_denom(&PrefixedDenom::from_str("transfer/channel-5/transfer/channel-5/uatom").unwrap());
        assert_eq!(
            local_denom_on_recv(&packet, "transfer/channel-5/uatom").unwrap(),
            expected
        );
    }
}
