//! Static pre-box-up logs used across harnesses.
//!
//! `FULL_LOG` is a complete console capture: a stale status session, the
//! optode dump, then the full self-test with every sensor the extractor
//! knows about. `FULL_LOG_RECORD` is the JSON value it must produce with
//! `FULL_LOG_SENSORS` sensors.

use serde_json::{json, Value};

/// Sensor count that propagates the add date to all eight slots.
pub const FULL_LOG_SENSORS: usize = 7;

pub const FULL_LOG: &str = concat!(
    "(Mar 01 2024 08:00:00, 0 sec) ApfId 9999. stale session\n",
    "> i s\n",
    "(Mar 01 2024 08:01:00, 60 sec) FwRev 999999 status only\n",
    "> o d\n",
    "Product Name\t4831\tOxygen Optode\n",
    "Production Date\t2021-06-14\n",
    "Optode SerNo: 2210\n",
    "OptodeLogConfig() PhaseCoef 4831 2210 1.5 -0.25 3\n",
    "OptodeLogConfig() FoilID 4831 2210 2310M\n",
    "> a\n",
    "(Mar 05 2024 10:11:12, 1200 sec) SelfTest()   ApexCtrl FwRev 103021 ApfId 12345.\n",
    "(Mar 05 2024 10:11:13, 1201 sec) Sbe41cp: SBE41cp serno 0x1F2E\n",
    "(Mar 05 2024 10:11:13, 1201 sec) Sbe41cpLogCal() temperature: 12-Jan-2024\n",
    "(Mar 05 2024 10:11:13, 1201 sec) Sbe41cpLogCal() conductivity: 12-Jan-2024\n",
    "(Mar 05 2024 10:11:13, 1201 sec) Sbe41cpLogCal() pressure S/N = 3456789, cal: 10-Jan-2024\n",
    "(Mar 05 2024 10:11:14, 1202 sec) Sbe41cpLogCal() V 2.6 TA0=-1.2e-04 TA1=3.1e-04 TA2=-4.5e-06 TA3=1.9e-07\n",
    "(Mar 05 2024 10:11:14, 1202 sec) Sbe41cpLogCal() G=-1.0e+00 H=1.5e-01 I=-2.0e-04 J=3.0e-05 CTCOR=3.25e-06 CWBOTC=0.0\n",
    "(Mar 05 2024 10:11:14, 1202 sec) Sbe41cpLogCal() PA0=1.23 PA1=4.56e-02 PTCA0=5.2e+05\n",
    "(Mar 05 2024 10:11:20, 1208 sec) DuraConfigLog_() SN:0117\n",
    "(Mar 05 2024 10:11:20, 1208 sec) DuraConfigLog_() App Build: Feb 20 2023, 14:02:11\n",
    "(Mar 05 2024 10:11:20, 1208 sec) DuraConfigLog_() Application: Dura v2.3.1 MSC3 045\n",
    "(Mar 05 2024 10:11:21, 1209 sec) IsusConfigLog_() SN:0117\n",
    "(Mar 05 2024 10:11:21, 1209 sec) IsusConfigLog_() Application: Isus v1.9.0 MSC3 045\n",
    "(Mar 05 2024 10:11:21, 1209 sec) IsusConfigLog_() Zeiss Coefficient Vals,1.1,2.2e-3,-3.3\n",
    "(Mar 05 2024 10:11:22, 1210 sec) MscCalFile_() pH_CalFile_20240105.cal\n",
    "(Mar 05 2024 10:11:22, 1210 sec) MscCalFile_() k0 = -1.3921\n",
    "(Mar 05 2024 10:11:22, 1210 sec) MscCalFile_() k2 = -1.05e-3\n",
    "(Mar 05 2024 10:11:23, 1211 sec) MscCalFile_() H,Calibration 03/01/2024\n",
    "(Mar 05 2024 10:11:23, 1211 sec) MscCalFile_() WaveLen,NO3,SWA,TSWA\n",
    "(Mar 05 2024 10:11:23, 1211 sec) MscCalFile_() E,217.14,1.2e-5,-0.33\n",
    "(Mar 05 2024 10:11:23, 1211 sec) MscCalFile_() E,217.94,1.4e-5,-0.31\n",
    "(Mar 05 2024 10:11:30, 1218 sec) FLBB SerNo: 5678\n",
    "(Mar 05 2024 10:11:30, 1218 sec) FLBB FwRev [FLBB 1.09]\n",
    "(Mar 05 2024 10:11:30, 1218 sec) FLBB wavelengths: Fl[470] Bb[700]\n",
    "(Mar 05 2024 10:11:40, 1228 sec) SelfTest() Ocr504 passed [Ocr504 v2.1]\n",
    "(Mar 05 2024 10:11:40, 1228 sec) Ocr504LogConfig() serial number: 0412\n",
    "(Mar 05 2024 10:11:40, 1228 sec) Ocr504LogConfig() optical channel 1:\n",
    "(Mar 05 2024 10:11:40, 1228 sec) Ocr504LogConfig()   a0:2147.8\n",
    "(Mar 05 2024 10:11:40, 1228 sec) Ocr504LogConfig()   a1:2.1e-9\n",
    "(Mar 05 2024 10:11:40, 1228 sec) Ocr504LogConfig()   im:1.37\n",
    "(Mar 05 2024 10:11:40, 1228 sec) Ocr504LogConfig() optical channel 2:\n",
    "(Mar 05 2024 10:11:40, 1228 sec) Ocr504LogConfig()   a0:2147.6\n",
    "(Mar 05 2024 10:11:50, 1238 sec) Optode SerNo: 2210 accepted: [4.3.2]\n",
    "(Mar 05 2024 10:12:00, 1248 sec) SelfTest() complete\n",
);

const ADD_DATE: &str = "Mar 05 2024 10:11:12";

/// One sensor slot of the expected document.
fn sensor(
    sensor_type: &str,
    parameter_type: &str,
    identity: [Option<&str>; 5],
    calibration_date: Option<&str>,
    coefficients: Value,
) -> Value {
    let [model, serial, manufacturer, firmware, manufacture_date] = identity;
    json!({
        "add_date": ADD_DATE,
        "sensor_type": sensor_type,
        "sensor_model": model,
        "sensor_serial_no": serial,
        "sensor_manufacturer": manufacturer,
        "sensor_firmware": firmware,
        "sensor_manufacture_date": manufacture_date,
        "sensor_comments": null,
        "calibrations": [{
            "add_date": ADD_DATE,
            "calibration_date": calibration_date,
            "parameter_type": parameter_type,
            "provided_to_customer": true,
            "calibration_type": "PRE_DEPLOYMENT",
            "parameter_accuracy": null,
            "parameter_resolution": null,
            "calibration_comments": null,
            "calibration_coefficients": coefficients,
            "calibration_metadata": null
        }]
    })
}

/// The record `FULL_LOG` must produce, as a JSON value.
pub fn full_log_record() -> Value {
    let ctd = |serial| [Some("Sbe41cp"), serial, Some("SBE"), Some("2.6"), None];
    json!({
        "add_date": ADD_DATE,
        "platform_model": "APEXapf11Sbe41cpOptodeIsusDuraFLBB",
        "platform_serial_no": "12345",
        "platform_firmware": "103021",
        "platform_manufacture_date": null,
        "platform_comments": null,
        "sensors": [
            sensor(
                "CTD_TEMP",
                "TEMP",
                ctd(Some("0x1F2E")),
                Some("12-Jan-2024"),
                json!({"TA0": -1.2e-04, "TA1": 3.1e-04, "TA2": -4.5e-06, "TA3": 1.9e-07}),
            ),
            sensor(
                "CTD_CNDC",
                "CNDC",
                ctd(Some("0x1F2E")),
                Some("12-Jan-2024"),
                json!({
                    "G": -1.0, "H": 1.5e-01, "I": -2.0e-04, "J": 3.0e-05,
                    "CTCOR": 3.25e-06, "CWBOTC": 0.0
                }),
            ),
            sensor(
                "CTD_PRESS",
                "PRESS",
                ctd(Some("3456789")),
                Some("10-Jan-2024"),
                json!({"PA0": 1.23, "PA1": 4.56e-02, "PTCA0": 5.2e+05}),
            ),
            sensor(
                "Optode",
                "Oxygen",
                [Some("4831"), Some("2210"), Some("Aanderaa"), Some("4.3.2"), Some("2021-06-14")],
                None,
                json!({"PhaseCoef": [1.5, -0.25, 3.0], "FoilID": ["2310M"]}),
            ),
            sensor(
                "DURA",
                "pH",
                [
                    Some("MSC3 045"),
                    Some("0117"),
                    Some("MBARI"),
                    Some("Dura v2.3.1"),
                    Some("Feb 20 2023, 14:02:11"),
                ],
                Some("January-05-24"),
                json!({"k0": -1.3921, "k2": -1.05e-3}),
            ),
            sensor(
                "Nitrate",
                "Nitrate",
                [Some("MSC3 045"), Some("0117"), Some("MBARI"), Some("Isus v1.9.0"), None],
                Some("03/01/2024"),
                json!({
                    "Zeiss": [1.1, 2.2e-3, -3.3],
                    "NO3": ["217.14", "217.94"],
                    "SWA": ["1.2e-5", "1.4e-5"],
                    "TSWA": ["-0.33", "-0.31"]
                }),
            ),
            sensor(
                "FLBB",
                "Fluorescence",
                [Some("FLBB-FL"), Some("5678"), Some("SBE"), Some("FLBB 1.09"), None],
                None,
                json!({"FL": ["470"], "BB": ["700"]}),
            ),
            sensor(
                "Radiometer",
                "irradiance",
                [Some("OCR504"), Some("0412"), Some("SBE"), Some("Ocr504 v2.1"), None],
                None,
                json!({
                    "optical_channel_1": {"a0": "2147.8", "a1": "2.1e-9", "im": "1.37"},
                    "optical_channel_2": {"a0": "2147.6"}
                }),
            ),
        ]
    })
}

/// A self-test with only the CTD present, wrapped in the usual markers.
pub const CTD_ONLY_LOG: &str = concat!(
    "> a\n",
    "(Jun 10 2023 09:00:00, 10 sec) SelfTest()   ApexCtrl FwRev 110621 ApfId 7001.\n",
    "(Jun 10 2023 09:00:01, 11 sec) Sbe41cp: SBE41cp serno 6543\n",
    "(Jun 10 2023 09:00:02, 12 sec) Sbe41cpLogCal() V 2.5 TA0=1.0e-04\n",
);

/// `FULL_LOG` with one CTD coefficient made unparseable.
pub fn full_log_with_bad_coefficient() -> String {
    FULL_LOG.replace("TA0=-1.2e-04", "TA0=abc")
}
